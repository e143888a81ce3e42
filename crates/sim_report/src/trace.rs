//! Live transaction tracing: one colored console line per simulation event.
//!
//! Green for admissions, yellow for queueing, red for releases, blue for
//! promotions. Purely a debugging aid; the printer only observes
//! [`TraceEvent`]s and never feeds anything back into the run.

use colored::Colorize;

use sim_core::calendar::format_datetime;
use sim_core::simulation::TraceEvent;

/// Formats and prints trace lines for a fixed service catalog.
#[derive(Debug, Clone)]
pub struct TracePrinter {
    service_names: Vec<String>,
}

impl TracePrinter {
    pub fn new(service_names: Vec<String>) -> Self {
        Self { service_names }
    }

    fn service_name(&self, index: usize) -> &str {
        self.service_names
            .get(index)
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// The uncolored text for one event.
    pub fn line(&self, event: &TraceEvent) -> String {
        match *event {
            TraceEvent::Admitted {
                customer,
                service,
                time,
                depart_time,
            } => format!(
                "Customer {} entered service {} at {} and will leave at {}",
                customer,
                self.service_name(service),
                format_datetime(time),
                format_datetime(depart_time),
            ),
            TraceEvent::Queued {
                customer,
                service,
                time,
            } => format!(
                "Customer {} entered queue for service {} at {}",
                customer,
                self.service_name(service),
                format_datetime(time),
            ),
            TraceEvent::Released {
                customer,
                service,
                time,
            } => format!(
                "Customer {} left service {} at {}",
                customer,
                self.service_name(service),
                format_datetime(time),
            ),
            TraceEvent::Promoted {
                customer,
                service,
                time,
                delay,
            } => format!(
                "Customer {} left queue for service {} at {} after waiting {} minutes",
                customer,
                self.service_name(service),
                format_datetime(time),
                delay,
            ),
        }
    }

    /// Print one event, colored by kind.
    pub fn print(&self, event: &TraceEvent) {
        let line = self.line(event);
        let colored_line = match event {
            TraceEvent::Admitted { .. } => line.green(),
            TraceEvent::Queued { .. } => line.yellow(),
            TraceEvent::Released { .. } => line.red(),
            TraceEvent::Promoted { .. } => line.blue(),
        };
        println!("{colored_line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer() -> TracePrinter {
        TracePrinter::new(vec!["Netflix".to_string(), "Prime".to_string()])
    }

    #[test]
    fn admitted_line_names_service_and_both_times() {
        let line = printer().line(&TraceEvent::Admitted {
            customer: 3,
            service: 0,
            time: 0,
            depart_time: 90,
        });
        assert_eq!(
            line,
            "Customer 3 entered service Netflix at 01/01/2023 00:00 \
             and will leave at 01/01/2023 01:30"
        );
    }

    #[test]
    fn promoted_line_reports_the_wait() {
        let line = printer().line(&TraceEvent::Promoted {
            customer: 8,
            service: 1,
            time: 100,
            delay: 100,
        });
        assert!(line.contains("left queue for service Prime"));
        assert!(line.contains("after waiting 100 minutes"));
    }

    #[test]
    fn unknown_service_index_does_not_panic() {
        let line = printer().line(&TraceEvent::Queued {
            customer: 1,
            service: 9,
            time: 5,
        });
        assert!(line.contains("service ?"));
    }
}
