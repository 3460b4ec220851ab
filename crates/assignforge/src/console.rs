//! Colorful console output for assignment runs.
//!
//! Provides a `tracing` layer that formats pipeline events with colors.
//! Enabled with the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "assignforge_solver=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. If another
/// global subscriber is already installed it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(AssignConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let line = format!("AssignForge v{} - exact capacitated assignment", env!("CARGO_PKG_VERSION"));
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", line.bright_cyan().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct AssignConsoleLayer;

impl<S: Subscriber> Layer<S> for AssignConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("assignforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    layout: Option<String>,
    agent_count: Option<u64>,
    resource_count: Option<u64>,
    slot_count: Option<u64>,
    instance_count: Option<u64>,
    thread_count: Option<u64>,
    solved_count: Option<u64>,
    failed_count: Option<u64>,
    augmentations: Option<u64>,
    duration_ms: Option<u64>,
    total_cost: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "layout" => self.layout = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.event = Some(value.to_string());
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "agent_count" => &mut self.agent_count,
            "resource_count" => &mut self.resource_count,
            "slot_count" => &mut self.slot_count,
            "instance_count" => &mut self.instance_count,
            "thread_count" => &mut self.thread_count,
            "solved_count" => &mut self.solved_count,
            "failed_count" => &mut self.failed_count,
            "augmentations" => &mut self.augmentations,
            "duration_ms" => &mut self.duration_ms,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "total_cost" {
            self.total_cost = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "assign_start" => format_assign_start(v),
        "assign_end" => format_assign_end(v),
        "batch_start" => format_batch_start(v),
        "batch_end" => format_batch_end(v),
        _ => String::new(),
    }
}

fn format_assign_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} agents ({}), resources ({}), slots ({}), layout ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Assigner]".bright_cyan(),
        count(v.agent_count).bright_yellow(),
        count(v.resource_count).bright_yellow(),
        count(v.slot_count).bright_yellow(),
        v.layout.as_deref().unwrap_or("?").bright_magenta(),
    )
}

fn format_assign_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Assignment ended: total cost ({}), augmentations ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Assigner]".bright_cyan(),
        format_cost(v.total_cost.unwrap_or(0.0)).bright_green().bold(),
        count(v.augmentations).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_batch_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} instances ({}) on {} thread(s)",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Batch]".bright_cyan(),
        count(v.instance_count).bright_yellow(),
        count(v.thread_count).bright_yellow(),
    )
}

fn format_batch_end(v: &EventVisitor) -> String {
    let failed = v.failed_count.unwrap_or(0);
    let failed_text = count(Some(failed));
    let failed_colored = if failed > 0 {
        failed_text.bright_red().to_string()
    } else {
        failed_text.white().to_string()
    };
    format!(
        "{} {} {} Batch ended: solved ({}), failed ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Batch]".bright_cyan(),
        count(v.solved_count).bright_green(),
        failed_colored,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 && cost.abs() < 1e15 {
        (cost as i64).to_formatted_string(&Locale::en)
    } else {
        format!("{:.3}", cost)
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}
