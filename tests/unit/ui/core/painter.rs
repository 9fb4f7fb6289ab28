use super::*;

#[test]
fn painter_collects_commands_and_clears() {
    let mut p = Painter::new();
    assert!(p.is_empty());

    p.fill_rect(Rect::new(0, 0, 1, 1), Style::default());
    p.text(Pos::new(0, 0), "hi", Style::default());
    p.border(Rect::new(0, 0, 3, 3), Style::default(), BorderKind::Dashed);
    p.spacer(Id::raw(7), Rect::new(0, 3, 3, 1));
    assert_eq!(p.cmds().len(), 4);

    p.clear();
    assert!(p.is_empty());
}

#[test]
fn spacers_are_listed_in_paint_order() {
    let mut p = Painter::new();
    p.spacer(Id::raw(1), Rect::new(0, 0, 4, 1));
    p.text(Pos::new(0, 1), "item", Style::default());
    p.spacer(Id::raw(2), Rect::new(0, 2, 4, 2));

    let spacers: Vec<_> = p.spacers().collect();
    assert_eq!(
        spacers,
        vec![
            (Id::raw(1), Rect::new(0, 0, 4, 1)),
            (Id::raw(2), Rect::new(0, 2, 4, 2)),
        ]
    );
}
