/// Command-line host for the appointment calendar.
///
/// Plays the part of the console UI: it owns the view state and the active
/// appointment source, and prints the grid after every action.

use chrono::NaiveDate;
use clinic_calendar::filter::Selection;
use clinic_calendar::grid;
use clinic_calendar::{
    AppointmentSource, AppointmentType, CalendarCommand, CalendarConfig, CalendarController,
    CalendarError, Direction, FilterUpdate, FixtureSource, JsonFileSource, Status, ViewMode,
    ViewState,
};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct CalendarCLI {
    controller: CalendarController,
    state: ViewState,
    source: Box<dyn AppointmentSource>,
    running: bool,
}

impl CalendarCLI {
    fn new() -> Self {
        let controller = CalendarController::default();
        let state = controller.initial_state();
        CalendarCLI {
            controller,
            state,
            source: Box::new(FixtureSource::new(Vec::new())),
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       CLINIC APPOINTMENT CALENDAR");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ---");
        println!("1. Show calendar");
        println!("2. Next period");
        println!("3. Previous period");
        println!("4. Today");
        println!("5. Jump to date");
        println!("6. Change view (day/week/month)");
        println!("7. Set filter");
        println!("8. Clear filters");
        println!("9. Visible hours");
        println!("10. Load appointments from JSON file");
        println!("11. Load demo week");
        println!("12. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let input = input.trim();

        if input.is_empty() {
            Ok(default.unwrap_or("").to_string())
        } else {
            Ok(input.to_string())
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<u32>) -> io::Result<u32> {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref())?;

            if let Ok(value) = input.parse::<u32>() {
                return Ok(value);
            }
            println!("Please enter a valid number");
        }
    }

    fn show(&self) {
        let view = self.controller.render(&self.state, self.source.as_ref());
        println!("\n{}", view);
        println!(
            "Source: {} | Filters: {}",
            self.source.name(),
            self.state.filters.describe()
        );
    }

    fn run_command(&mut self, command: CalendarCommand) {
        let (state, view) = self
            .controller
            .dispatch(self.state.clone(), command, self.source.as_ref());
        self.state = state;
        println!("\n{}", view);
    }

    fn jump_to_date(&mut self) -> io::Result<()> {
        let today = grid::today().format("%Y-%m-%d").to_string();
        let input = self.get_input("Date (YYYY-MM-DD)", Some(today.as_str()))?;
        match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            Ok(date) => self.run_command(CalendarCommand::SetAnchorDate(date)),
            Err(_) => println!("Invalid date: '{}'", input),
        }
        Ok(())
    }

    fn change_view(&mut self) -> io::Result<()> {
        let current = self.state.view_mode.name();
        let input = self.get_input("View mode (day/week/month)", Some(current))?;
        match ViewMode::from_string(&input) {
            Ok(mode) => self.run_command(CalendarCommand::SetViewMode(mode)),
            Err(e) => println!("{}", e),
        }
        Ok(())
    }

    fn read_filter_update(&self) -> io::Result<Result<FilterUpdate, CalendarError>> {
        println!("\nFilter on:");
        println!("  1. Doctor");
        println!("  2. Status");
        println!("  3. Type");
        println!("  4. Text search");
        let choice = self.get_int_input("Select criterion", Some(4))?;

        let update = match choice {
            1 => {
                let doctor = self.get_input("Doctor id (or 'all')", Some("all"))?;
                Ok(FilterUpdate::Doctor(if doctor.eq_ignore_ascii_case("all") {
                    Selection::All
                } else {
                    Selection::Only(doctor)
                }))
            }
            2 => {
                let status = self.get_input(
                    "Status (scheduled/completed/canceled/no-show/all)",
                    Some("all"),
                )?;
                if status.eq_ignore_ascii_case("all") {
                    Ok(FilterUpdate::Status(Selection::All))
                } else {
                    Status::from_string(&status).map(|s| FilterUpdate::Status(Selection::Only(s)))
                }
            }
            3 => {
                let kind = self.get_input(
                    "Type (follow-up/new-patient/emergency/routine/all)",
                    Some("all"),
                )?;
                if kind.eq_ignore_ascii_case("all") {
                    Ok(FilterUpdate::Kind(Selection::All))
                } else {
                    AppointmentType::from_string(&kind)
                        .map(|k| FilterUpdate::Kind(Selection::Only(k)))
                }
            }
            _ => Ok(FilterUpdate::Query(self.get_input("Search text", Some(""))?)),
        };
        Ok(update)
    }

    fn set_filter(&mut self) -> io::Result<()> {
        match self.read_filter_update()? {
            Ok(update) => self.run_command(CalendarCommand::SetFilter(update)),
            Err(e) => println!("{}", e),
        }
        Ok(())
    }

    fn configure_hours(&mut self) -> io::Result<()> {
        let config = *self.controller.config();
        let start = self.get_int_input("Visible hours start", Some(config.visible_start_hour))?;
        let end = self.get_int_input("Visible hours end", Some(config.visible_end_hour))?;

        let updated = CalendarConfig::new(
            start,
            end,
            config.min_visible_minutes,
            config.pixels_per_minute,
        );
        match updated {
            Ok(config) => {
                self.controller = CalendarController::new(config);
                println!("\nVisible hours set to {:02}:00 - {:02}:00", start, end);
            }
            Err(e) => println!("Error: {}", e),
        }
        Ok(())
    }

    fn load_file(&mut self) -> io::Result<()> {
        let path = self.get_input("Path to appointments JSON", None)?;
        let source = JsonFileSource::new(path);

        match source.load() {
            Ok(report) => {
                println!(
                    "\nLoaded {} appointments ({} rejected)",
                    report.appointments.len(),
                    report.rejected.len()
                );
                for rejected in report.rejected.iter().take(5) {
                    println!("  - {}", rejected);
                }
                info!(path = %source.path().display(), "switched appointment source");
                self.source = Box::new(source);
            }
            Err(e) => println!("Error: {}", e),
        }
        Ok(())
    }

    fn load_demo(&mut self) {
        let source = FixtureSource::demo(self.state.anchor_date);
        println!(
            "\nLoaded demo week with {} appointments around {}",
            source.appointments().len(),
            self.state.anchor_date.format("%Y-%m-%d")
        );
        self.source = Box::new(source);
        self.show();
    }

    fn handle(&mut self, choice: u32) -> io::Result<()> {
        match choice {
            1 => self.show(),
            2 => self.run_command(CalendarCommand::Navigate(Direction::Next)),
            3 => self.run_command(CalendarCommand::Navigate(Direction::Previous)),
            4 => self.run_command(CalendarCommand::Today),
            5 => self.jump_to_date()?,
            6 => self.change_view()?,
            7 => self.set_filter()?,
            8 => self.run_command(CalendarCommand::SetFilter(FilterUpdate::ClearAll)),
            9 => self.configure_hours()?,
            10 => self.load_file()?,
            11 => self.load_demo(),
            12 => {
                self.running = false;
                println!("\nGoodbye!");
            }
            _ => println!("Invalid choice"),
        }
        Ok(())
    }

    fn run(&mut self) -> io::Result<()> {
        self.print_header();

        while self.running {
            self.print_menu();
            let choice = self.get_int_input("Enter choice", Some(1))?;
            self.handle(choice)?;
        }
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut cli = CalendarCLI::new();
    if let Err(e) = cli.run() {
        if e.kind() != io::ErrorKind::UnexpectedEof {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
