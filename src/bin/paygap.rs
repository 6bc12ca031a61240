use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use paygap::config::{ClientConfig, DashboardOptions};
use paygap::models::Origin;
use paygap::{Client, Dashboard, Selection, storage, view};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "paygap",
    version,
    about = "Summarize gender wage-gap history and ML forecasts per country"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the dashboard datasets (and optionally export them).
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Backend base URL.
    #[arg(long, default_value = "http://localhost:5000/api")]
    api: String,
    /// Read inputs from a directory instead of the backend.
    #[arg(long, conflicts_with = "api")]
    data_dir: Option<PathBuf>,
    /// Selected country codes separated by comma or semicolon (default CAN,USA,MEX).
    #[arg(short, long)]
    countries: Option<String>,
    /// Length of the best-countries list.
    #[arg(long, default_value_t = 15)]
    top: usize,
    /// Length of the policy-leaders list.
    #[arg(long, default_value_t = 10)]
    policy_top: usize,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
    /// Save the whole dashboard as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
    /// Save trend, ranking, deltas and distribution as CSV files in this directory.
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

fn fmt_gap(v: f64) -> String {
    // Up to 2 decimals, trailing zeros trimmed.
    let s = format!("{:.2}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{}%", fmt_gap(x)),
        _ => "N/A".to_string(),
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_ascii_uppercase())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
    }
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let inputs = match &args.data_dir {
        Some(dir) => storage::load_inputs(dir)
            .with_context(|| format!("load inputs from {}", dir.display()))?,
        None => {
            let cfg = ClientConfig {
                base_url: args.api.clone(),
                timeout: Duration::from_secs(args.timeout),
                ..ClientConfig::default()
            };
            Client::with_config(&cfg)?.fetch_all()?
        }
    };

    let selection = match &args.countries {
        Some(s) => Selection::new(parse_list(s)),
        None => Selection::default(),
    };
    let options = DashboardOptions {
        best_n: args.top,
        policy_n: args.policy_top,
    };
    let dash = view::assemble(&inputs, &selection, &options)?;

    print_summary(&dash);

    if let Some(path) = args.json.as_ref() {
        storage::save_json(&dash, path)?;
        eprintln!("Saved dashboard to {}", path.display());
    }
    if let Some(dir) = args.csv_dir.as_ref() {
        storage::save_csv_dir(&dash, dir)?;
        eprintln!("Saved CSV tables to {}", dir.display());
    }
    Ok(())
}

fn print_summary(d: &Dashboard) {
    println!(
        "{} data points | {} countries | {}-{} -> predictions to {}",
        d.data_points, d.country_count, d.earliest_year, d.latest_year, d.max_prediction_year
    );
    println!(
        "global avg {}  predicted {} {}  best today {}",
        fmt_opt(d.global_average),
        d.max_prediction_year,
        fmt_opt(d.predicted_average),
        d.best_today()
            .map(|b| format!("{} ({}%)", b.country_display_name, fmt_gap(b.gap)))
            .unwrap_or_else(|| "N/A".into())
    );
    println!("selected: {}", d.selected_country_display_names.join(", "));

    println!("\nglobal trend");
    for p in &d.global_trend {
        let tag = match p.origin {
            Origin::Historical => "",
            Origin::Prediction => "  (forecast)",
        };
        println!(
            "  {}  avg={} min={} max={}{}",
            p.year,
            fmt_gap(p.avg_gap),
            fmt_gap(p.min_gap),
            fmt_gap(p.max_gap),
            tag
        );
    }

    println!("\nbest countries ({})", d.latest_year);
    for (i, e) in d.best.iter().enumerate() {
        println!("  {:>2}. {}  {}%", i + 1, e.country_display_name, fmt_gap(e.gap));
    }

    println!("\nselected: {} vs {}", d.latest_year, d.max_prediction_year);
    for r in &d.deltas {
        let sign = if r.delta > 0.0 { "+" } else { "" };
        println!(
            "  {}  {}% -> {}%  ({}{}%)",
            r.country_display_name,
            fmt_gap(r.current_gap),
            fmt_gap(r.predicted_gap),
            sign,
            fmt_gap(r.delta)
        );
    }

    println!("\ndistribution ({})", d.latest_year);
    for b in &d.distribution {
        println!("  {:<7} {}", b.label, b.count);
    }

    if !d.regional_summary.is_empty() {
        println!("\nregions");
        for r in &d.regional_summary {
            println!("  {}  {}%", r.region, fmt_gap(r.gap));
        }
    }

    if !d.policy_leaders.is_empty() {
        println!("\npolicy leaders");
        for (i, p) in d.policy_leaders.iter().enumerate() {
            println!(
                "  {:>2}. {}  -{}%/year  (now {}%)",
                i + 1,
                p.name,
                fmt_gap(p.annual_reduction),
                fmt_gap(p.current_gap)
            );
        }
    }
}
