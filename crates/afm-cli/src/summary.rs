use std::path::Path;

use afm_core::minmax::aggregate::ExtremumKind;
use afm_core::minmax::MinMaxReport;
use afm_core::pipeline::config::PipelineConfig;
use afm_core::pipeline::PipelineReport;
use console::Style;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red().bold(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();
    print_title(&s, "AFM Pipeline");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Data"),
        s.path.apply_to(config.data_path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Save"),
        s.path.apply_to(config.save_path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("On error"),
        s.value.apply_to(config.on_error)
    );
    println!();

    println!("  {}", s.header.apply_to("Conversion"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Multiply"),
        s.value.apply_to(config.conversion.multiply_const)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Skip lines"),
        s.value.apply_to(config.conversion.header_lines)
    );
    println!();

    if config.autocorrelation.enabled {
        println!("  {}", s.header.apply_to("Autocorrelation"));
        println!(
            "    {:<12}{}",
            s.label.apply_to("Width"),
            s.value.apply_to(format!("{} µm", config.autocorrelation.width_line))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Plot"),
            s.value
                .apply_to(if config.autocorrelation.plot { "yes" } else { "no" })
        );
    } else {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Autocorrelation"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();

    if config.min_max.enabled {
        println!("  {}", s.header.apply_to("Min/Max"));
        println!(
            "    {:<12}{}",
            s.label.apply_to("Block"),
            s.value.apply_to(format!(
                "{}x{}",
                config.min_max.block_size, config.min_max.block_size
            ))
        );
    } else {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Min/Max"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Exclude"),
        s.value.apply_to(config.exclude_suffixes().join(", "))
    );
    println!();
}

pub fn print_minmax_summary(file: &Path, report: &MinMaxReport) {
    let s = Styles::new();
    print_title(&s, "Min/Max Analysis");

    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Block"),
        s.value
            .apply_to(format!("{}x{}", report.block_size, report.block_size))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Trimmed"),
        s.value.apply_to(report.rows_to_drop)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Blocks"),
        s.value.apply_to(report.block_count)
    );
    println!();

    for kind in [ExtremumKind::Min, ExtremumKind::Max] {
        println!("  {}", s.header.apply_to(kind));
        for c in report.counts.iter().filter(|c| c.kind == kind) {
            println!(
                "    {:<12}{}",
                s.label.apply_to(format!("({}, {})", c.row, c.col)),
                s.value.apply_to(c.count)
            );
        }
        println!();
    }
}

pub fn print_run_report(report: &PipelineReport) {
    let s = Styles::new();
    print_title(&s, "Results");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Converted"),
        s.value.apply_to(report.converted.len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Analyzed"),
        s.value.apply_to(report.files.len())
    );
    for file in &report.files {
        println!(
            "    {} ({} output(s))",
            s.path.apply_to(file.source.display()),
            file.outputs.len()
        );
    }

    if report.failures.is_empty() {
        println!();
        return;
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Failed"),
        s.error.apply_to(report.failures.len())
    );
    for failure in &report.failures {
        println!(
            "    {} [{}]: {}",
            s.path.apply_to(failure.source.display()),
            failure.stage,
            s.error.apply_to(&failure.error)
        );
    }
    println!();
}
