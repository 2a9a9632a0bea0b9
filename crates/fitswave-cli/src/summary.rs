use std::path::Path;

use console::Style;
use fitswave_core::pipeline::config::BatchConfig;
use fitswave_core::pipeline::BatchSummary;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    ok: Style,
    failed: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            ok: Style::new().green().bold(),
            failed: Style::new().red().bold(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_batch_summary(config: &BatchConfig, config_path: &Path) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("FITS Wavelet Batch"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(18)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Config"),
        s.path.apply_to(config_path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.paths.input_folder.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.paths.output_folder.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Decomposition"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Wavelet"),
        s.method.apply_to(config.parameters.wavelet_type)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Levels"),
        s.value.apply_to(config.parameters.decomposition_level)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Execution"),
        s.value.apply_to(if config.execution.parallel {
            "parallel"
        } else {
            "sequential"
        })
    );
    println!();
}

pub fn print_batch_results(summary: &BatchSummary, config: &BatchConfig) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Processed"),
        s.value.apply_to(summary.outcomes.len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Succeeded"),
        s.ok.apply_to(summary.succeeded())
    );
    if summary.failed() > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Failed"),
            s.failed.apply_to(summary.failed())
        );
        for outcome in summary.failures() {
            println!(
                "    {} {}",
                s.failed.apply_to(outcome.file_name()),
                s.label.apply_to(&outcome.message)
            );
        }
    }

    let artifacts: usize = summary.outcomes.iter().map(|o| o.artifacts.len()).sum();
    println!(
        "  {:<14}{} band(s) under {}",
        s.label.apply_to("Written"),
        s.value.apply_to(artifacts),
        s.path.apply_to(config.paths.output_folder.display())
    );
    println!();
}
