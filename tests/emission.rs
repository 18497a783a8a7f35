use vorotwo::Cell2D;

fn unit_square() -> Cell2D {
    let mut cell = Cell2D::new();
    cell.init(-1.0, 1.0, -1.0, 1.0);
    cell
}

#[test]
fn test_gnuplot_square() {
    let mut out = Vec::new();
    unit_square().draw_gnuplot(0.0, 0.0, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["-1 -1", "1 -1", "1 1", "-1 1", "-1 -1", ""],
        "unexpected gnuplot output:\n{}",
        text
    );
    assert_eq!(lines[0], lines[4]);
}

#[test]
fn test_gnuplot_displacement() {
    let mut out = Vec::new();
    unit_square().draw_gnuplot(10.0, 20.0, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("9 19\n"));
}

#[test]
fn test_gnuplot_empty_cell() {
    let mut cell = unit_square();
    assert!(!cell.plane(1.0, 0.0, -4.0));

    let mut out = Vec::new();
    cell.draw_gnuplot(0.0, 0.0, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_pov_square() {
    let mut out = Vec::new();
    unit_square().draw_pov(0.0, 0.0, 0.0, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text.matches("sphere{").count(), 4);
    assert_eq!(text.matches("cylinder{").count(), 4);
    assert!(text.starts_with("sphere{<-1,-1,0>,r}\ncylinder{<-1,-1,0>,<1,-1,0>,r}\n"));
}

#[test]
fn test_pov_empty_cell() {
    let mut cell = unit_square();
    assert!(!cell.plane(1.0, 0.0, -4.0));

    let mut out = Vec::new();
    cell.draw_pov(0.0, 0.0, 0.0, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_custom_format_controls() {
    let mut out = Vec::new();
    unit_square()
        .output_custom("%i %q r=%r w=%w m=%m p=%p a=%a c=%c C=%C", 7, 1.5, -2.5, 0.25, &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(
        text,
        "7 1.5 -2.5 r=0.25 w=4 m=2 p=8 a=4 c=0 0 C=1.5 -2.5\n"
    );
}

#[test]
fn test_custom_format_edge_cases() {
    let cell = unit_square();

    // A trailing percent sign is dropped.
    let mut out = Vec::new();
    cell.output_custom("area=%a%", 0, 0.0, 0.0, 0.0, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "area=4\n");

    // Unknown control sequences pass through literally.
    let mut out = Vec::new();
    cell.output_custom("%z and %%", 0, 0.0, 0.0, 0.0, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "%z and %%\n");

    // No control sequences at all.
    let mut out = Vec::new();
    cell.output_custom("plain text", 0, 0.0, 0.0, 0.0, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "plain text\n");
}

#[test]
fn test_custom_format_empty_cell() {
    let mut cell = unit_square();
    assert!(!cell.plane(1.0, 0.0, -4.0));

    let mut out = Vec::new();
    cell.output_custom("%w %a %p %c", 3, 0.5, 0.5, 0.0, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0 0 0 0 0\n");
}
