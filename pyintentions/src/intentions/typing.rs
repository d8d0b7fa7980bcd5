//! The `Optional`/`Union`/pipe intentions.

use super::{ids, Context, Intention, IntentionMetadata, Offer};
use crate::error::IntentionError;
use crate::typing::{
    make_maybe, make_non_maybe, optional_to_pipe, pipe_to_optional, pipe_to_union,
    union_to_pipe, with_type_site, Resolver, TypeRewrite, TypeSite,
};

type Transform = fn(&TypeSite<'_>, &Resolver<'_>) -> Option<TypeRewrite>;

/// A typing rewrite offered under a fixed label.
#[derive(Clone, Copy)]
pub struct TypingIntention {
    id: &'static str,
    label: &'static str,
    transform: Transform,
}

pub(super) fn typing_intentions() -> Vec<TypingIntention> {
    vec![
        TypingIntention::new(
            ids::OPTIONAL_TO_PIPE,
            "Replace with X | None (PEP 604)",
            optional_to_pipe,
        ),
        TypingIntention::new(ids::PIPE_TO_OPTIONAL, "Replace with Optional[X]", pipe_to_optional),
        TypingIntention::new(
            ids::UNION_TO_PIPE,
            "Replace with X | Y (PEP 604)",
            union_to_pipe,
        ),
        TypingIntention::new(ids::PIPE_TO_UNION, "Replace with Union[X, Y]", pipe_to_union),
        TypingIntention::new(ids::MAKE_MAYBE, "Make type maybe (add | None)", make_maybe),
        TypingIntention::new(
            ids::MAKE_NON_MAYBE,
            "Make type non-maybe (remove None)",
            make_non_maybe,
        ),
    ]
}

impl TypingIntention {
    fn new(id: &'static str, label: &'static str, transform: Transform) -> Self {
        Self {
            id,
            label,
            transform,
        }
    }

    fn prepare(&self, context: &Context<'_>) -> Option<TypeRewrite> {
        let resolver = Resolver::new(context.file, context.offset, context.settings);
        with_type_site(context.file, context.offset, |site| {
            (self.transform)(site, &resolver)
        })
    }
}

impl Intention for TypingIntention {
    fn metadata(&self) -> IntentionMetadata {
        IntentionMetadata {
            id: self.id,
            family: self.label,
        }
    }

    fn detect(&self, context: &Context<'_>) -> Option<Offer> {
        self.prepare(context).map(|_| Offer {
            id: self.id,
            label: self.label.to_string(),
        })
    }

    fn apply(&self, context: &Context<'_>) -> Result<String, IntentionError> {
        let rewrite = self
            .prepare(context)
            .ok_or_else(|| context.not_available(self.id))?;
        tracing::debug!(
            id = self.id,
            adds = rewrite.add_imports.len(),
            cleanup = rewrite.cleanup.len(),
            "applying typing rewrite"
        );
        Ok(rewrite.apply(context.file.source(), context.settings)?)
    }
}
