//! The prelude is enough to fit a label and lay out a value row.

use fitline::prelude::*;

#[test]
fn fit_and_place_through_prelude() -> Result<()> {
    let mut oracle = MonospaceOracle::new(1.0).strategy(BreakStrategy::Greedy);
    let request =
        LayoutRequest::new("Hydrogen Peroxide", 10.0, FontSizeBounds::fixed(1.0)?).max_lines(2);

    let mut session = FitSession::new(FitConfig::default());
    session.update(&request, 1.0);
    let plan = session
        .run_to_stable(&mut oracle)
        .expect("monospace oracle always measures");
    assert_eq!(plan.mode, LineMode::Multi { max_lines: 2 });
    assert_eq!(plan.display_text, "Hydrogen\nPeroxide");

    let items = [
        fitline::Item::new("H", 1.008),
        fitline::Item::new("O", 15.999),
    ];
    let rows = SlotRows::build(&items, 3, SlotDirection::from_rtl(true));
    assert_eq!(rows.labels, [None, Some("O".to_string()), Some("H".to_string())]);
    Ok(())
}

#[test]
fn invalid_bounds_surface_as_layout_error() {
    let err: Error = FontSizeBounds::new(0.0, 8.0).unwrap_err().into();
    assert!(matches!(err, Error::Layout(_)));
}
