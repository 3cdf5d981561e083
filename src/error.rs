use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("at least 2 targets are required, found {count}")]
    TooFewTargets { count: usize },
    #[error("no hole {target}, the board has {count}")]
    NoSuchTarget { target: usize, count: usize },
    #[error("found {holes} holes but {moles} moles")]
    TargetMismatch { holes: usize, moles: usize },
    #[error("required element `{0}` is missing from the page")]
    MissingElement(String),
    #[error("unknown difficulty `{0}` (expected easy, normal or hard)")]
    UnknownDifficulty(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("the game has not been initialized")]
    NoGame,
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = GameError::TooFewTargets { count: 1 };
        assert_eq!(err.to_string(), "at least 2 targets are required, found 1");
        let err = GameError::MissingElement("#score".into());
        assert!(err.to_string().contains("#score"));
    }
}
