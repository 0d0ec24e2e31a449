use std::path::PathBuf;

use clap::Subcommand;
use studydesk_core::grading::{templates, Module, Semester, Unit, UnitEdit};
use studydesk_core::storage::{keys, Database, GradeBook};
use uuid::Uuid;

use super::module::ModuleEditArgs;
use super::{notify, open_book, print_json, read_json, CmdResult};

#[derive(Subcommand)]
pub enum SemesterAction {
    /// Print the current semester report without saving
    Show,
    /// Recalculate the semester and save the result
    Calculate {
        /// Replace the semester with one read from a JSON file first
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the raw semester tree as JSON
    Export,
    /// Add a unit
    AddUnit {
        name: String,
        #[arg(long, default_value = "1")]
        coefficient: f64,
    },
    /// Rename a unit or change its coefficient
    SetUnit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        coefficient: Option<f64>,
    },
    /// Remove a unit and its modules
    RemoveUnit { id: String },
    /// Add a module to a unit
    AddModule {
        #[arg(long)]
        unit: String,
        name: String,
        #[arg(long, default_value = "1")]
        coefficient: f64,
        /// The module has a practical (TD) component
        #[arg(long)]
        td: bool,
        /// The module has a lab (TP) component
        #[arg(long)]
        tp: bool,
    },
    /// Change grades or fields of a module
    SetModule {
        #[arg(long)]
        unit: String,
        #[arg(long)]
        module: String,
        #[command(flatten)]
        edit: ModuleEditArgs,
    },
    /// Remove a module from a unit
    RemoveModule {
        #[arg(long)]
        unit: String,
        #[arg(long)]
        module: String,
    },
    /// Delete the saved semester; the next command starts from the template
    Clear,
}

fn current_semester(book: &GradeBook<Database>) -> Semester {
    book.load_semester()
        .map(|record| record.to_semester())
        .unwrap_or_else(templates::default_semester)
}

/// Calculate, persist and print the new snapshot.
fn commit(book: &GradeBook<Database>, semester: &Semester) -> CmdResult {
    let report = semester.calculate();
    book.save_semester(&report)?;
    notify(&report.notification());
    print_json(&report)?;
    Ok(())
}

pub fn run(action: SemesterAction) -> CmdResult {
    let book = open_book()?;

    match action {
        SemesterAction::Show => {
            let record = book.load_semester();
            notify(&GradeBook::<Database>::load_event(
                keys::SEMESTER,
                record.as_ref().map(|r| r.calculation_timestamp),
            ));
            let semester = record
                .map(|r| r.to_semester())
                .unwrap_or_else(templates::default_semester);
            print_json(&semester.calculate())?;
        }
        SemesterAction::Calculate { file } => {
            let semester = match file {
                Some(path) => read_json::<Semester>(&path)?,
                None => current_semester(&book),
            };
            commit(&book, &semester)?;
        }
        SemesterAction::Export => {
            print_json(&current_semester(&book).recompute())?;
        }
        SemesterAction::AddUnit { name, coefficient } => {
            let unit = Unit::new(Uuid::new_v4().to_string(), name, coefficient);
            commit(&book, &current_semester(&book).with_added_unit(unit))?;
        }
        SemesterAction::SetUnit {
            id,
            name,
            coefficient,
        } => {
            let mut semester = current_semester(&book);
            if let Some(name) = name {
                semester = semester.with_unit(&id, UnitEdit::Name(name))?;
            }
            if let Some(c) = coefficient {
                semester = semester.with_unit(&id, UnitEdit::Coefficient(c))?;
            }
            commit(&book, &semester)?;
        }
        SemesterAction::RemoveUnit { id } => {
            commit(&book, &current_semester(&book).without_unit(&id)?)?;
        }
        SemesterAction::AddModule {
            unit,
            name,
            coefficient,
            td,
            tp,
        } => {
            let module = Module::new(Uuid::new_v4().to_string(), name, coefficient, td, tp);
            commit(&book, &current_semester(&book).with_added_module(&unit, module)?)?;
        }
        SemesterAction::SetModule { unit, module, edit } => {
            let mut semester = current_semester(&book);
            for edit in edit.into_edits()? {
                semester = semester.with_module(&unit, &module, edit)?;
            }
            commit(&book, &semester)?;
        }
        SemesterAction::RemoveModule { unit, module } => {
            commit(&book, &current_semester(&book).without_module(&unit, &module)?)?;
        }
        SemesterAction::Clear => {
            notify(&book.clear_semester()?);
        }
    }
    Ok(())
}
