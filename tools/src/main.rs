//! dash-runner: headless driver for the expo dashboard core.
//!
//! Usage:
//!   dash-runner --data-dir ./data
//!   dash-runner --data-dir ./data --ipc-mode
//!
//! One-shot mode loads the tables, renders the Home page, and prints a text
//! summary. IPC mode reads newline-delimited JSON commands on stdin and
//! answers each with the re-rendered view of the current page, so a UI
//! front end can drive navigation and widgets over a pipe.

use anyhow::Result;
use expo_core::{view::Page, AppState, DataContext, ViewOutput};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetView,
    SelectPage { page: Page },
    SetIndustries { values: Vec<String> },
    SetSizes { values: Vec<String> },
    SelectEvent { event_name: String },
    SetVenuePct { value: u32 },
    SetYearRange { low: i32, high: i32 },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    let ctx = DataContext::load(Path::new(data_dir))?;
    let mut state = AppState::new(&ctx);

    if ipc_mode {
        run_ipc_loop(&ctx, &mut state)?;
    } else {
        println!("Expo Data Visualization Platform — dash-runner");
        println!("  data_dir: {data_dir}");
        println!();
        print_summary(&state.render(&ctx));
    }

    Ok(())
}

fn run_ipc_loop(ctx: &DataContext, state: &mut AppState) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetView => {}
            IpcCommand::SelectPage { page } => state.select_page(page),
            IpcCommand::SetIndustries { values } => state.set_industries(values),
            IpcCommand::SetSizes { values } => state.set_sizes(values),
            IpcCommand::SelectEvent { event_name } => state.select_event(event_name),
            IpcCommand::SetVenuePct { value } => state.set_venue_pct(value),
            IpcCommand::SetYearRange { low, high } => state.set_year_range(low, high),
        }

        // One interaction, one synchronous recompute of the current page.
        let view = state.render(ctx);
        writeln!(stdout, "{}", serde_json::to_string(&view)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(view: &ViewOutput) {
    println!("=== HOME ===");
    for metric in &view.metrics {
        println!("  {:<16} {}", metric.label, metric.value);
    }
    for chart in &view.charts {
        if let expo_core::chart::ChartSpec::GroupedBar { title, groups, .. } = chart {
            println!();
            println!("=== {} ===", title.to_uppercase());
            for group in groups {
                println!("  {:<20} {:?}", group.name, group.values);
            }
        }
    }
    for notice in &view.notices {
        log::warn!("{notice}");
    }
}
