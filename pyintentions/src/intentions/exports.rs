//! Intentions that maintain module-level dunders.

use super::{apply_edits, ids, Context, Intention, IntentionMetadata, Offer};
use crate::collection::{add_element, quote_element, remove_element, EmptyPolicy, Removal};
use crate::constants::ALL;
use crate::dunder::{
    find_dunder_assignment, find_pep8_insertion_index, is_name_in_all, movable_dunder_at,
    statement_lines,
};
use crate::error::IntentionError;
use crate::reflow::{delete_lines, insert_before_statement, move_to_pep8_position, Spacing};
use crate::scope::{enclosing_block, find_top_level_name};
use ruff_python_ast::Expr;

/// Adds the top-level name under the cursor to `__all__`, creating the
/// assignment when the module has none.
pub struct AddToAll;

impl AddToAll {
    fn rewrite(context: &Context<'_>) -> Option<(String, String)> {
        let file = context.file;
        let name = find_top_level_name(file, context.offset)?;
        if is_name_in_all(file, &name) {
            return None;
        }
        let text = if let Some(all) = find_dunder_assignment(file, ALL) {
            let quoted = quote_element(file, all.elements, &name, context.settings);
            let edits = add_element(file, &all, &quoted)?;
            apply_edits(file.source(), edits).ok()?
        } else {
            let quote = context.settings.quote_style.as_char();
            let index = find_pep8_insertion_index(file.body());
            tracing::debug!(index, "creating __all__");
            insert_before_statement(
                file.source(),
                index,
                &format!("{ALL} = [{quote}{name}{quote}]"),
                Spacing::Dunder,
            )
        };
        Some((name, text))
    }
}

impl Intention for AddToAll {
    fn metadata(&self) -> IntentionMetadata {
        IntentionMetadata {
            id: ids::ADD_TO_ALL,
            family: "Add to __all__",
        }
    }

    fn detect(&self, context: &Context<'_>) -> Option<Offer> {
        let (name, _) = Self::rewrite(context)?;
        Some(Offer {
            id: self.id(),
            label: format!("Add '{name}' to __all__"),
        })
    }

    fn apply(&self, context: &Context<'_>) -> Result<String, IntentionError> {
        Self::rewrite(context)
            .map(|(_, text)| text)
            .ok_or_else(|| context.not_available(self.id()))
    }
}

/// Removes the top-level name under the cursor from `__all__`, deleting the
/// assignment once it would be empty.
pub struct RemoveFromAll;

impl RemoveFromAll {
    fn rewrite(context: &Context<'_>) -> Option<(String, String)> {
        let file = context.file;
        let name = find_top_level_name(file, context.offset)?;
        let all = find_dunder_assignment(file, ALL)?;
        // Deleting the sole statement of a block would leave the block empty.
        let keep = !file.occupies_whole_lines(all.stmt)
            || enclosing_block(file.body(), all.stmt).is_some_and(|block| block.len() == 1);
        let policy = if keep {
            EmptyPolicy::KeepEmpty
        } else {
            EmptyPolicy::DeleteStatement
        };
        let removal = remove_element(
            file,
            &all,
            |element| matches!(element, Expr::StringLiteral(s) if s.value.to_str() == name),
            policy,
        )?;
        let text = match removal {
            Removal::Edits(edits) => apply_edits(file.source(), edits).ok()?,
            Removal::DeleteStatement => {
                let (first, last) = statement_lines(file, all.stmt);
                tracing::debug!(first, last, "deleting emptied __all__");
                delete_lines(file.source(), first, last)
            }
        };
        Some((name, text))
    }
}

impl Intention for RemoveFromAll {
    fn metadata(&self) -> IntentionMetadata {
        IntentionMetadata {
            id: ids::REMOVE_FROM_ALL,
            family: "Remove from __all__",
        }
    }

    fn detect(&self, context: &Context<'_>) -> Option<Offer> {
        let (name, _) = Self::rewrite(context)?;
        Some(Offer {
            id: self.id(),
            label: format!("Remove '{name}' from __all__"),
        })
    }

    fn apply(&self, context: &Context<'_>) -> Result<String, IntentionError> {
        Self::rewrite(context)
            .map(|(_, text)| text)
            .ok_or_else(|| context.not_available(self.id()))
    }
}

/// Moves the dunder assignment under the cursor above the imports.
pub struct MoveDunder;

impl Intention for MoveDunder {
    fn metadata(&self) -> IntentionMetadata {
        IntentionMetadata {
            id: ids::MOVE_DUNDER,
            family: "Move dunder to PEP 8 position",
        }
    }

    fn detect(&self, context: &Context<'_>) -> Option<Offer> {
        let dunder = movable_dunder_at(context.file, context.offset)?;
        Some(Offer {
            id: self.id(),
            label: format!("Move {} to PEP 8 position", dunder.name),
        })
    }

    fn apply(&self, context: &Context<'_>) -> Result<String, IntentionError> {
        let file = context.file;
        let dunder = movable_dunder_at(file, context.offset)
            .ok_or_else(|| context.not_available(self.id()))?;
        let (first, last) = statement_lines(file, dunder.stmt);
        tracing::debug!(name = %dunder.name, first, last, "moving dunder");
        Ok(move_to_pep8_position(file.source(), first, last))
    }
}
