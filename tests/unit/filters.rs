use chrono::Utc;
use talentmap_backend::db::models::{Position, PositionListing};
use talentmap_backend::filters::{Endpoint, FilterMap, FilterSet};
use talentmap_backend::services::positions_service::CurrentCycleAvailability;

fn listing(id: i32, number: &str, availability: &CurrentCycleAvailability) -> PositionListing {
    let position = Position {
        id,
        position_number: number.to_string(),
        title: format!("Officer {}", id),
        grade: Some("04".to_string()),
        skill: None,
        post_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    PositionListing::new(position, None, availability.of(id))
}

fn filters(pairs: &[(&str, &str)]) -> FilterMap {
    let mut map = FilterMap::new();
    for (k, v) in pairs {
        map.entry(k.to_string()).or_default().push(v.to_string());
    }
    map
}

#[test]
fn availability_filter_splits_current_cycle_members() {
    // positions 1..=4 are in the current cycle, 3 holds a handshake
    let availability = CurrentCycleAvailability::new([1, 2, 3, 4], [3]);
    let rows: Vec<PositionListing> = (1..=5)
        .map(|id| listing(id, &format!("56{:03}", id), &availability))
        .collect();

    let available = FilterSet::parse(
        Endpoint::Position,
        &filters(&[("is_available_in_current_bidcycle", "true")]),
    )
    .unwrap();
    let ids: Vec<i32> = available.apply(rows.clone()).iter().map(|l| l.position.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);

    let unavailable = FilterSet::parse(
        Endpoint::Position,
        &filters(&[("is_available_in_current_bidcycle", "false")]),
    )
    .unwrap();
    let ids: Vec<i32> = unavailable.apply(rows).iter().map(|l| l.position.id).collect();
    assert_eq!(ids, vec![3]);
}

#[test]
fn clauses_are_combined() {
    let availability = CurrentCycleAvailability::default();
    let rows = vec![
        listing(1, "56001", &availability),
        listing(2, "10001", &availability),
        listing(3, "56002", &availability),
    ];
    let set = FilterSet::parse(
        Endpoint::Position,
        &filters(&[("position_number__startswith", "56"), ("id__in", "1,2")]),
    )
    .unwrap();
    let ids: Vec<i32> = set.apply(rows).iter().map(|l| l.position.id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn filters_from_another_collection_are_rejected() {
    assert!(FilterSet::parse(Endpoint::Position, &filters(&[("danger_pay__gte", "5")])).is_err());
    assert!(FilterSet::parse(Endpoint::BidCycle, &filters(&[("active", "maybe")])).is_err());
}
