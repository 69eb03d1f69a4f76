use collisions::{disc_disc_intersect, get_mtv};
use common::shapes::Disc;

#[test]
fn disjoint_discs_do_not_intersect() {
    let a = Disc::new(0, 0, 5);
    let b = Disc::new(20, 0, 5);
    assert!(!disc_disc_intersect(&a, &b));
    assert!(get_mtv(&a, &[b]).is_none());
}

#[test]
fn touching_discs_intersect() {
    let a = Disc::new(0, 0, 5);
    let b = Disc::new(10, 0, 5);
    assert!(disc_disc_intersect(&a, &b));
    // zero penetration, so there is nothing to resolve
    assert!(get_mtv(&a, &[b]).is_none());
}

#[test]
fn overlapping_discs_intersect() {
    let a = Disc::new(0, 0, 5);
    let b = Disc::new(6, 0, 5);
    assert!(disc_disc_intersect(&a, &b));
    assert!(disc_disc_intersect(&b, &a));
}

#[test]
fn mtv_points_away_from_the_other_disc() {
    let disc = Disc::new(8, 0, 5);
    let other = Disc::new(0, 0, 5);
    let (mx, my) = get_mtv(&disc, &[other]).unwrap();
    // pushed along +x by the penetration depth (10 - 8 = 2)
    assert!(mx > 0.0);
    assert!((mx - 2.0).abs() < 1e-3);
    assert!(my.abs() < 1e-3);
}

#[test]
fn mtv_picks_the_shallowest_contact() {
    let disc = Disc::new(0, 0, 5);
    let deep = Disc::new(2, 0, 5);
    let shallow = Disc::new(0, 9, 5);
    let (mx, my) = get_mtv(&disc, &[deep, shallow]).unwrap();
    // the shallow contact along -y wins (depth 1 vs depth 8)
    assert!(my < 0.0);
    assert!((my + 1.0).abs() < 1e-3);
    assert!(mx.abs() < 1e-3);
}

#[test]
fn concentric_discs_resolve_along_x() {
    let disc = Disc::new(3, 3, 4);
    let other = Disc::new(3, 3, 4);
    let (mx, my) = get_mtv(&disc, &[other]).unwrap();
    assert!((mx - 8.0).abs() < 1e-3);
    assert!(my.abs() < 1e-3);
}
