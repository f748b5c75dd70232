use std::path::Path;

use console::Style;
use thumbsift_core::io::storyboard::StoryboardConfig;
use thumbsift_core::pipeline::FrameSelection;
use thumbsift_core::stats::StatBounds;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    highlight: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            highlight: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_selection_summary(
    dir: &Path,
    frame_count: usize,
    storyboard: Option<&StoryboardConfig>,
    selection: &FrameSelection,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Frame Selection"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(dir.display())
    );
    match storyboard {
        Some(layout) => println!(
            "  {:<14}{}",
            s.label.apply_to("Storyboard"),
            s.value.apply_to(format!(
                "{}x{}, limit {}",
                layout.columns, layout.rows, layout.frame_limit
            ))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Storyboard"),
            s.disabled.apply_to("none")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(frame_count)
    );
    println!();

    print_pass(&s, "Detail", &selection.detail_bounds, &selection.detail_retained);
    print_pass(&s, "Difference", &selection.diff_bounds, &selection.diff_retained);

    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pivot"),
        s.value.apply_to(selection.pivot_index)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Selected"),
        s.highlight.apply_to(selection.selected_index)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Detail"),
        s.value.apply_to(format!("{:.4}", selection.scores.detail_score))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Diff"),
        s.value.apply_to(format!("{:.4}", selection.scores.diff_score))
    );
    println!();
}

fn print_pass(s: &Styles, name: &str, bounds: &StatBounds, retained: &[usize]) {
    println!("  {}", s.header.apply_to(format!("{name} filter")));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Mean"),
        s.value.apply_to(format!("{:.4}", bounds.mean))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Stddev"),
        s.value.apply_to(format!("{:.4}", bounds.stddev))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Band"),
        s.value
            .apply_to(format!("[{:.4}, {:.4}]", bounds.lower, bounds.upper))
    );
    println!(
        "    {:<12}{:?}",
        s.label.apply_to("Retained"),
        retained
    );
    println!();
}
