#[cfg(feature = "serde")]
use serde_crate::Deserialize;

use crate::{Method, Stage};

/// A [`Method`] as it would be stored in a method library: its name, [`Stage`] and the notation
/// of its plain lead and calls.  Nothing is parsed until [`MethodDef::build`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize),
    serde(crate = "serde_crate", deny_unknown_fields)
)]
pub struct MethodDef {
    /// The name of the method, without its [`Stage`] (e.g. `"Plain Bob"`)
    pub name: String,
    pub stage: Stage,
    pub place_notation: String,
    /// See [`Method::set_calls`].  Defaults to `0` (i.e. the lead end).
    #[cfg_attr(feature = "serde", serde(default))]
    pub calling_position: isize,
    /// Bob notation, or `""` for no bobs
    #[cfg_attr(feature = "serde", serde(default))]
    pub bob: String,
    /// Single notation, or `""` for no singles
    #[cfg_attr(feature = "serde", serde(default))]
    pub single: String,
}

impl MethodDef {
    /// Parse this definition into a [`Method`].  Either everything parses, or an error is
    /// returned.
    ///
    /// # Example
    /// ```
    /// use touchframe::{CallType, MethodDef, Stage};
    ///
    /// let def = MethodDef {
    ///     name: "Grandsire".to_owned(),
    ///     stage: Stage::DOUBLES,
    ///     place_notation: "3,&1.5.1.5.1".to_owned(),
    ///     calling_position: -2,
    ///     bob: "3.1".to_owned(),
    ///     single: "3.123".to_owned(),
    /// };
    /// let grandsire = def.build()?;
    /// assert_eq!(grandsire.lead_len(), 10);
    /// assert_eq!(grandsire.calling_position(), 8);
    /// assert_eq!(grandsire.call_blocks(CallType::Single)[0].len(), 2);
    /// # Ok::<(), touchframe::Error>(())
    /// ```
    pub fn build(&self) -> crate::Result<Method> {
        Method::new(self.name.as_str(), self.stage, &self.place_notation)?.with_calls(
            self.calling_position,
            &self.bob,
            &self.single,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{place_not::NotationError, Block, Error};

    fn grandsire() -> MethodDef {
        MethodDef {
            name: "Grandsire".to_owned(),
            stage: Stage::DOUBLES,
            place_notation: "3,&1.5.1.5.1".to_owned(),
            calling_position: -2,
            bob: "3.1".to_owned(),
            single: "3.123".to_owned(),
        }
    }

    #[test]
    fn build() {
        let method = grandsire().build().unwrap();
        assert_eq!(method.title(), "Grandsire Doubles");
        assert_eq!(method.plain_lead(0).unwrap().len(), 10);

        let mut block = Block::new(Stage::DOUBLES);
        method.ring_plain_course(&mut block).unwrap();
        assert_eq!(block.len(), 30);
    }

    #[test]
    fn build_errors() {
        let mut def = grandsire();
        def.single = "3.128".to_owned();
        assert!(matches!(
            def.build(),
            Err(Error::Notation(NotationError::PlaceOutOfStage { .. }))
        ));

        let mut def = grandsire();
        def.place_notation = "3,&1.5.1.5.1<x".to_owned();
        assert_eq!(
            def.build().unwrap_err(),
            Error::Notation(NotationError::InvalidOffset("X".to_owned()))
        );
    }
}
