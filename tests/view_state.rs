use quickcheck_macros::quickcheck;
use sector_drill_wasm::view_state::ViewState;

#[test]
fn disc_fits_the_shorter_side() {
    let view = ViewState::new(800.0, 500.0, 10.0);
    assert_eq!(view.max_radius(), 240.0);
    assert_eq!(view.center(), (400.0, 250.0));
    assert_eq!(view.to_center_coords(400.0, 0.0), (0.0, -250.0));
}

#[test]
fn collapsed_container_has_no_radius() {
    let mut view = ViewState::default();
    view.resize(-5.0, 10.0);
    assert_eq!(view.width, 0.0);
    assert_eq!(view.max_radius(), 0.0);
}

#[quickcheck]
fn max_radius_is_never_negative(width: u16, height: u16, padding: u8) -> bool {
    let view = ViewState::new(width as f64, height as f64, padding as f64);
    let radius = view.max_radius();
    radius >= 0.0 && radius <= (width.min(height) as f64) / 2.0
}
