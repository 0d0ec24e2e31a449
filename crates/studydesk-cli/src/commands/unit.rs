use std::path::PathBuf;

use clap::Subcommand;
use studydesk_core::grading::{templates, Module, Unit};
use studydesk_core::storage::{keys, Database, GradeBook};
use studydesk_core::CalculationLevel;
use studydesk_core::Event;
use uuid::Uuid;

use super::module::ModuleEditArgs;
use super::{notify, open_book, print_json, read_json, CmdResult};

#[derive(Subcommand)]
pub enum UnitAction {
    /// Print the saved unit, or the sample unit when nothing is saved
    Show,
    /// Recalculate and save the unit
    Calc {
        /// Replace the unit with one read from a JSON file first
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Add a module to the unit
    AddModule {
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
    /// Change fields of a module
    SetModule {
        id: String,
        #[command(flatten)]
        edit: ModuleEditArgs,
    },
    /// Remove a module by id
    RemoveModule { id: String },
    /// Delete the saved unit
    Clear,
}

fn current_unit(book: &GradeBook<Database>) -> Unit {
    book.load_unit()
        .map(|record| record.to_unit())
        .unwrap_or_else(templates::default_unit)
}

fn commit(book: &GradeBook<Database>, unit: &Unit) -> CmdResult {
    book.save_unit(unit)?;
    let unit = unit.recompute();
    notify(&Event::calculation(CalculationLevel::Unit, unit.average));
    print_json(&unit)?;
    Ok(())
}

pub fn run(action: UnitAction) -> CmdResult {
    let book = open_book()?;

    match action {
        UnitAction::Show => {
            let record = book.load_unit();
            notify(&GradeBook::<Database>::load_event(
                keys::UNIT,
                record.as_ref().map(|r| r.calculation_timestamp),
            ));
            let unit = record
                .map(|r| r.to_unit())
                .unwrap_or_else(templates::default_unit);
            print_json(&unit.recompute())?;
        }
        UnitAction::Calc { file } => {
            let unit = match file {
                Some(path) => read_json::<Unit>(&path)?,
                None => current_unit(&book),
            };
            commit(&book, &unit)?;
        }
        UnitAction::AddModule {
            name,
            coefficient,
            td,
            tp,
        } => {
            let module = Module::new(Uuid::new_v4().to_string(), name, coefficient, td, tp);
            let unit = current_unit(&book).with_added_module(module);
            commit(&book, &unit)?;
        }
        UnitAction::SetModule { id, edit } => {
            let mut unit = current_unit(&book);
            for edit in edit.into_edits()? {
                unit = unit.with_module(&id, edit)?;
            }
            commit(&book, &unit)?;
        }
        UnitAction::RemoveModule { id } => {
            let unit = current_unit(&book).without_module(&id)?;
            commit(&book, &unit)?;
        }
        UnitAction::Clear => {
            notify(&book.clear_unit()?);
        }
    }
    Ok(())
}
