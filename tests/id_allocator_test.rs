//! Tests for sibling id allocation

use rstest::rstest;

use sitetree::domain::{allocate_id, Area, Building, NodeId, Sector};

#[rstest]
#[case::empty(vec![], 0)]
#[case::contiguous(vec![0, 1, 2], 3)]
#[case::gap_in_the_middle(vec![0, 1, 3], 2)]
#[case::gap_at_start(vec![1, 2], 0)]
#[case::two_gaps_lowest_wins(vec![0, 2, 4], 1)]
#[case::unsorted(vec![3, 0, 1], 2)]
#[case::duplicates(vec![0, 0, 2], 1)]
fn given_existing_ids_when_allocating_then_returns_lowest_free(
    #[case] existing: Vec<NodeId>,
    #[case] expected: NodeId,
) {
    let id = allocate_id(existing.clone());

    assert_eq!(id, expected);
    assert!(!existing.contains(&id));
}

#[test]
fn given_any_small_id_set_when_allocating_then_result_is_minimum_absent_value() {
    // Every subset of 0..6
    for mask in 0u32..64 {
        let existing: Vec<NodeId> = (0..6).filter(|bit| mask & (1 << bit) != 0).collect();

        let id = allocate_id(existing.iter().copied());

        assert!(!existing.contains(&id), "mask {mask:#b}");
        assert!((0..id).all(|lower| existing.contains(&lower)), "mask {mask:#b}");
    }
}

#[test]
fn given_sector_with_buildings_when_allocating_then_uses_sibling_ids() {
    let mut sector = Sector::new(0);
    sector.add_building(Building::new(0)).unwrap();
    sector.add_building(Building::new(2)).unwrap();

    assert_eq!(allocate_id(sector.building_ids()), 1);
}

#[test]
fn given_new_area_when_allocating_sector_id_then_returns_zero() {
    let area = Area::new(0);

    assert_eq!(allocate_id(area.sector_ids()), 0);
}
