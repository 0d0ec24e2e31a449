use clap::Subcommand;
use studydesk_core::grading::{parse_score_input, templates, AcademicYear, SemesterEdit, SemesterResult};
use studydesk_core::storage::{keys, Database, GradeBook};
use uuid::Uuid;

use super::{notify, open_book, print_json, CmdResult};

#[derive(Subcommand)]
pub enum YearAction {
    /// Print the current year report without saving
    Show,
    /// Recalculate the annual average and save it
    Calculate,
    /// Add a semester with a manually entered average
    Add {
        name: String,
        #[arg(long, default_value = "1")]
        coefficient: f64,
        /// Semester average; omit or pass an empty string when not known yet
        #[arg(long, default_value = "")]
        average: String,
    },
    /// Change a semester entry
    Set {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        coefficient: Option<f64>,
        /// Manual average; an empty string clears it
        #[arg(long, conflicts_with = "from_semester")]
        average: Option<String>,
        /// Use the saved semester tree instead of a manual average
        #[arg(long)]
        from_semester: bool,
    },
    /// Delete the saved year; the next command starts from the template
    Clear,
}

fn current_year(book: &GradeBook<Database>) -> AcademicYear {
    book.load_year()
        .map(|record| record.to_year())
        .unwrap_or_else(templates::default_year)
}

fn commit(book: &GradeBook<Database>, year: &AcademicYear) -> CmdResult {
    let report = year.calculate();
    book.save_year(&report)?;
    notify(&report.notification());
    print_json(&report)?;
    Ok(())
}

pub fn run(action: YearAction) -> CmdResult {
    let book = open_book()?;

    match action {
        YearAction::Show => {
            let record = book.load_year();
            notify(&GradeBook::<Database>::load_event(
                keys::YEAR,
                record.as_ref().map(|r| r.calculation_timestamp),
            ));
            let year = record
                .map(|r| r.to_year())
                .unwrap_or_else(templates::default_year);
            print_json(&year.calculate())?;
        }
        YearAction::Calculate => {
            commit(&book, &current_year(&book))?;
        }
        YearAction::Add {
            name,
            coefficient,
            average,
        } => {
            let entry = SemesterResult::manual(
                Uuid::new_v4().to_string(),
                name,
                coefficient,
                parse_score_input(&average)?,
            );
            commit(&book, &current_year(&book).with_added_semester(entry))?;
        }
        YearAction::Set {
            id,
            name,
            coefficient,
            average,
            from_semester,
        } => {
            let mut year = current_year(&book);
            if let Some(name) = name {
                year = year.with_semester(&id, SemesterEdit::Name(name))?;
            }
            if let Some(c) = coefficient {
                year = year.with_semester(&id, SemesterEdit::Coefficient(c))?;
            }
            if let Some(raw) = average {
                year = year.with_semester(&id, SemesterEdit::Manual(parse_score_input(&raw)?))?;
            }
            if from_semester {
                let semester = book
                    .load_semester()
                    .ok_or("no saved semester; run `semester calculate` first")?
                    .to_semester();
                year = year.with_semester(&id, SemesterEdit::Computed(semester))?;
            }
            commit(&book, &year)?;
        }
        YearAction::Clear => {
            notify(&book.clear_year()?);
        }
    }
    Ok(())
}
