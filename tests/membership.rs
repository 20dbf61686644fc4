//! Membership soundness: no false negatives ever, and no non-member is
//! confirmed after the exact stage, whichever strategy backs it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quintic::{HashIndex, Lookup, MembershipIndex, PowerTable, ScanIndex, Wide128, WideInt};

#[test]
fn every_table_value_is_confirmed_u64() {
    let table: PowerTable<u64> = PowerTable::build(3000);
    let hash = HashIndex::build(&table, 20);
    let scan = ScanIndex::build(&table, 20);
    for base in 0..table.len() {
        let value = table.value(base);
        assert_eq!(hash.lookup(value), Lookup::Present(base));
        assert_eq!(scan.lookup(value), Lookup::Present(base));
    }
}

#[test]
fn every_table_value_is_confirmed_across_the_u64_boundary() {
    // Bases beyond 7131 push fifth powers past 2^64, so this table holds
    // values on both sides of the boundary.
    let table: PowerTable<Wide128> = PowerTable::build(7500);
    let hash = HashIndex::build(&table, 22);
    let scan = ScanIndex::build(&table, 22);
    for base in 0..table.len() {
        let value = table.value(base);
        assert_eq!(hash.lookup(value), Lookup::Present(base));
        assert_eq!(scan.lookup(value), Lookup::Present(base));
    }
}

#[test]
fn fuzzed_non_members_are_never_confirmed() {
    let table: PowerTable<u64> = PowerTable::build(3000);
    let hash = HashIndex::build(&table, 20);
    let scan = ScanIndex::build(&table, 20);
    let members: std::collections::HashSet<u64> = table.as_slice().iter().copied().collect();

    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..200_000 {
        let probe: u64 = rng.gen();
        if members.contains(&probe) {
            continue;
        }
        assert!(!matches!(hash.lookup(probe), Lookup::Present(_)));
        // Random probe order also exercises the scan cursor resets.
        assert!(!matches!(scan.lookup(probe), Lookup::Present(_)));
    }
}

#[test]
fn wide_non_members_near_table_values_are_rejected() {
    let table: PowerTable<Wide128> = PowerTable::build(8000);
    let hash = HashIndex::build(&table, 22);
    let scan = ScanIndex::build(&table, 22);
    for base in 2..table.len() {
        let near = table.value(base) + Wide128::from_u64(1);
        assert!(!matches!(hash.lookup(near), Lookup::Present(_)));
        assert!(!matches!(scan.lookup(near), Lookup::Present(_)));
    }
}
