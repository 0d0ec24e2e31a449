use clap::{Args, Subcommand};
use studydesk_core::grading::{parse_score_input, GradeBand, Module, ModuleEdit, ScoreSet};
use studydesk_core::ValidationError;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum ModuleAction {
    /// Compute a module average from its component scores
    Calc {
        /// Exam (EMD) score
        #[arg(long, default_value = "")]
        exam: String,
        /// Practical (TD) score; passing the flag makes TD required
        #[arg(long)]
        td: Option<String>,
        /// Lab (TP) score; passing the flag makes TP required
        #[arg(long)]
        tp: Option<String>,
        /// Coefficient inside the unit
        #[arg(long, default_value = "1")]
        coefficient: f64,
        #[arg(long, default_value = "Module")]
        name: String,
    },
}

/// Field edits shared by every command that changes a module.
///
/// Score options accept an empty string to clear the score.
#[derive(Args, Debug, Default)]
pub struct ModuleEditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub coefficient: Option<f64>,
    #[arg(long)]
    pub has_td: Option<bool>,
    #[arg(long)]
    pub has_tp: Option<bool>,
    #[arg(long)]
    pub exam: Option<String>,
    #[arg(long)]
    pub td: Option<String>,
    #[arg(long)]
    pub tp: Option<String>,
}

impl ModuleEditArgs {
    pub fn into_edits(self) -> Result<Vec<ModuleEdit>, ValidationError> {
        let mut edits = Vec::new();
        if let Some(name) = self.name {
            edits.push(ModuleEdit::Name(name));
        }
        if let Some(c) = self.coefficient {
            edits.push(ModuleEdit::Coefficient(c));
        }
        if let Some(flag) = self.has_td {
            edits.push(ModuleEdit::HasPractical(flag));
        }
        if let Some(flag) = self.has_tp {
            edits.push(ModuleEdit::HasLab(flag));
        }
        if let Some(raw) = self.exam {
            edits.push(ModuleEdit::Exam(parse_score_input(&raw)?));
        }
        if let Some(raw) = self.td {
            edits.push(ModuleEdit::Practical(parse_score_input(&raw)?));
        }
        if let Some(raw) = self.tp {
            edits.push(ModuleEdit::Lab(parse_score_input(&raw)?));
        }
        Ok(edits)
    }
}

pub fn run(action: ModuleAction) -> CmdResult {
    match action {
        ModuleAction::Calc {
            exam,
            td,
            tp,
            coefficient,
            name,
        } => {
            let practical = td.as_deref().map(parse_score_input).transpose()?.flatten();
            let lab = tp.as_deref().map(parse_score_input).transpose()?.flatten();
            let scores = ScoreSet::new(parse_score_input(&exam)?, practical, lab);
            let module = Module::named(name)
                .with_scores(scores)
                .apply(ModuleEdit::Coefficient(coefficient))
                .apply(ModuleEdit::HasPractical(td.is_some()))
                .apply(ModuleEdit::HasLab(tp.is_some()))
                .recompute();

            print_json(&serde_json::json!({
                "module": module,
                "formula": module.weighting().formula(),
                "band": module.band().map(GradeBand::label),
            }))?;
        }
    }
    Ok(())
}
