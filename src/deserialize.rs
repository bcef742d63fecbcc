use serde::Deserialize;

use crate::{tokenizer::CreationError, Comparison, Engine, RuleSet};

#[derive(Debug, Deserialize)]
pub(crate) struct EngineDef {
    start: String,
    end: String,
    #[serde(default)]
    comparison: Comparison,
    #[serde(default)]
    rules: RuleSet,
}

impl TryFrom<EngineDef> for Engine {
    type Error = CreationError;

    fn try_from(engine_def: EngineDef) -> Result<Self, Self::Error> {
        log::debug!(
            "loaded engine {:?} {:?} with {} rules",
            engine_def.start,
            engine_def.end,
            engine_def.rules.len()
        );

        Ok(
            Self::with_comparison(&engine_def.start, &engine_def.end, engine_def.comparison)?
                .with_rules(engine_def.rules),
        )
    }
}
