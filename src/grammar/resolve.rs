//! Mapping resolution.
//!
//! Checks a requested [`Aes`] against a geometry's channel rules and a
//! dataset's schema, producing a [`ResolvedMapping`] the renderer can trust.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::aes::{Aes, Channel, Constant, MappingValue};
use super::data::{Dataset, VariableKind};
use super::geom::{ChannelRule, Domain, Geom};
use crate::error::{Error, Result};

/// A channel binding that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedChannel {
    /// A dataset variable with its kind.
    Variable {
        /// Variable name.
        name: String,
        /// Variable kind.
        kind: VariableKind,
    },
    /// A fixed value.
    Constant(Constant),
}

/// A geometry together with its validated channel bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMapping {
    geom: Geom,
    bindings: BTreeMap<Channel, ResolvedChannel>,
}

impl ResolvedMapping {
    /// The geometry this mapping was resolved for.
    #[must_use]
    pub fn geom(&self) -> &Geom {
        &self.geom
    }

    /// The binding of a channel.
    #[must_use]
    pub fn get(&self, channel: Channel) -> Option<&ResolvedChannel> {
        self.bindings.get(&channel)
    }

    /// The variable name and kind a channel maps, if any.
    #[must_use]
    pub fn variable(&self, channel: Channel) -> Option<(&str, VariableKind)> {
        match self.bindings.get(&channel) {
            Some(ResolvedChannel::Variable { name, kind }) => Some((name.as_str(), *kind)),
            _ => None,
        }
    }

    /// The constant a channel is set to, if any.
    #[must_use]
    pub fn constant(&self, channel: Channel) -> Option<&Constant> {
        match self.bindings.get(&channel) {
            Some(ResolvedChannel::Constant(c)) => Some(c),
            _ => None,
        }
    }

    /// Channels that survived resolution, in canonical order.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.bindings.keys().copied()
    }
}

/// Validate `requested` (overridden by the geometry's own aesthetics)
/// against `geom` and `dataset`.
///
/// # Errors
///
/// - [`Error::StatUnavailable`] when the geometry cannot draw its statistic.
/// - [`Error::MissingRequiredChannel`] listing every unmapped required channel.
/// - [`Error::UnknownVariable`] when a mapped variable is not in the schema.
/// - [`Error::TypeMismatch`] when a required channel's data is of the wrong
///   kind. Optional channels of the wrong kind are dropped instead.
pub fn resolve(geom: &Geom, requested: &Aes, dataset: &Dataset) -> Result<ResolvedMapping> {
    if !geom.geom_type.supports(geom.stat) {
        return Err(Error::StatUnavailable(format!(
            "{} layers cannot use the {} statistic",
            geom.geom_type.name(),
            geom.stat.name()
        )));
    }

    let aes = match &geom.aes {
        Some(layer) => requested.merge(layer),
        None => requested.clone(),
    };
    let rules = geom.channels();

    let missing: Vec<String> = rules
        .iter()
        .filter(|rule| rule.required && !aes.contains(rule.channel))
        .map(|rule| rule.channel.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingRequiredChannel { channels: missing });
    }

    let schema = dataset.schema();
    let mut bindings = BTreeMap::new();

    for (channel, value) in aes.iter() {
        let Some(rule) = rules.iter().find(|r| r.channel == channel) else {
            debug!("{} ignores channel '{channel}'", geom.geom_type.name());
            continue;
        };

        let resolved = match value {
            MappingValue::Variable(name) => {
                let kind = schema.kind_of(name).ok_or_else(|| Error::UnknownVariable {
                    channel: channel.to_string(),
                    variable: name.clone(),
                })?;
                if domain_accepts(rule.domain, kind) {
                    Ok(ResolvedChannel::Variable { name: name.clone(), kind })
                } else {
                    Err(Error::type_mismatch(channel.name(), name, rule.domain.describe(), kind))
                }
            }
            MappingValue::Constant(constant) => {
                if constant_fits(rule, constant) {
                    Ok(ResolvedChannel::Constant(constant.clone()))
                } else {
                    Err(Error::TypeMismatch {
                        channel: channel.to_string(),
                        variable: constant.describe(),
                        expected: expected_constant(channel).to_string(),
                        found: constant_kind(constant).to_string(),
                    })
                }
            }
        };

        match resolved {
            Ok(binding) => {
                bindings.insert(channel, binding);
            }
            Err(err) if !rule.required => {
                warn!("optional channel '{channel}' falls back to its default: {err}");
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        "resolved {} mapping: {:?}",
        geom.geom_type.name(),
        bindings.keys().map(|c: &Channel| c.name()).collect::<Vec<_>>()
    );
    Ok(ResolvedMapping { geom: geom.clone(), bindings })
}

fn domain_accepts(domain: Domain, kind: VariableKind) -> bool {
    match domain {
        Domain::Any => true,
        Domain::Continuous => kind == VariableKind::Numeric,
        Domain::Discrete => kind.is_discrete(),
    }
}

fn constant_fits(rule: &ChannelRule, constant: &Constant) -> bool {
    match rule.channel {
        Channel::X | Channel::Y | Channel::Ymin | Channel::Ymax => match constant {
            Constant::Number(_) => rule.domain != Domain::Discrete,
            Constant::Text(_) => rule.domain != Domain::Continuous,
            _ => false,
        },
        Channel::Color | Channel::Fill => matches!(constant, Constant::Color(_)),
        Channel::Shape => matches!(constant, Constant::Shape(_)),
        Channel::Size | Channel::Alpha => matches!(constant, Constant::Number(_)),
        Channel::Label | Channel::Group => {
            matches!(constant, Constant::Text(_) | Constant::Number(_))
        }
    }
}

fn expected_constant(channel: Channel) -> &'static str {
    match channel {
        Channel::Color | Channel::Fill => "a color",
        Channel::Shape => "a shape",
        Channel::Size | Channel::Alpha => "a number",
        _ => "a number or text",
    }
}

fn constant_kind(constant: &Constant) -> &'static str {
    match constant {
        Constant::Number(_) => "a number",
        Constant::Color(_) => "a color",
        Constant::Text(_) => "text",
        Constant::Shape(_) => "a shape",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::grammar::geom::PointShape;
    use crate::grammar::stat::Stat;

    fn cars() -> Dataset {
        Dataset::builder()
            .numeric("displ", &[1.8, 2.0, 5.7])
            .numeric("hwy", &[29.0, 31.0, 26.0])
            .categorical("class", &["compact", "compact", "2seater"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_point_resolves() {
        let m = resolve(&Geom::point(), &Aes::new().x("displ").y("hwy"), &cars()).unwrap();
        assert_eq!(m.variable(Channel::X), Some(("displ", VariableKind::Numeric)));
        assert_eq!(m.channels().count(), 2);
    }

    #[test]
    fn test_missing_y() {
        let err = resolve(&Geom::point(), &Aes::new().x("displ"), &cars()).unwrap_err();
        match err {
            Error::MissingRequiredChannel { channels } => assert_eq!(channels, vec!["y"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_lists_all_in_order() {
        let err = resolve(&Geom::ribbon(), &Aes::new(), &cars()).unwrap_err();
        match err {
            Error::MissingRequiredChannel { channels } => {
                assert_eq!(channels, vec!["x", "ymin", "ymax"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_variable() {
        let err = resolve(&Geom::point(), &Aes::new().x("displ").y("cty"), &cars()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownVariable { ref channel, ref variable } if channel == "y" && variable == "cty"
        ));
    }

    #[test]
    fn test_unknown_variable_on_optional_channel_fails() {
        let aes = Aes::new().x("displ").y("hwy").color("drv");
        assert!(matches!(
            resolve(&Geom::point(), &aes, &cars()),
            Err(Error::UnknownVariable { .. })
        ));
    }

    #[test]
    fn test_required_type_mismatch() {
        let err = resolve(&Geom::area(), &Aes::new().x("class").y("hwy"), &cars()).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref channel, .. } if channel == "x"));
    }

    #[test]
    fn test_optional_shape_on_numeric_degrades() {
        let aes = Aes::new().x("displ").y("hwy").shape("hwy");
        let m = resolve(&Geom::point(), &aes, &cars()).unwrap();
        assert!(m.get(Channel::Shape).is_none());
    }

    #[test]
    fn test_ignores_unknown_channels_for_geom() {
        let aes = Aes::new().x("displ").y("hwy").label("class");
        let m = resolve(&Geom::point(), &aes, &cars()).unwrap();
        assert!(m.get(Channel::Label).is_none());
    }

    #[test]
    fn test_constant_checked() {
        let aes = Aes::new().x("displ").y("hwy").color_value(Rgba::RED).shape_value(PointShape::X);
        let m = resolve(&Geom::point(), &aes, &cars()).unwrap();
        assert_eq!(m.constant(Channel::Color), Some(&Constant::Color(Rgba::RED)));
        assert_eq!(m.constant(Channel::Shape), Some(&Constant::Shape(PointShape::X)));

        let bad = Aes::new().x("displ").set(Channel::Y, Constant::Color(Rgba::RED));
        assert!(matches!(
            resolve(&Geom::point(), &bad, &cars()),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_layer_aes_overrides_requested() {
        let geom = Geom::point().aes(Aes::new().y("displ"));
        let m = resolve(&geom, &Aes::new().x("displ").y("hwy"), &cars()).unwrap();
        assert_eq!(m.variable(Channel::Y), Some(("displ", VariableKind::Numeric)));
    }

    #[test]
    fn test_bar_count_does_not_need_y() {
        let m = resolve(&Geom::bar(), &Aes::new().x("class"), &cars()).unwrap();
        assert!(m.get(Channel::Y).is_none());

        let summed = Geom::bar().stat(Stat::Sum);
        assert!(resolve(&summed, &Aes::new().x("class"), &cars()).is_err());
    }

    #[test]
    fn test_unsupported_stat_rejected() {
        let aes = Aes::new().x("displ").y("hwy");
        for geom in [
            Geom::bar().stat(Stat::Density2d),
            Geom::col().stat(Stat::Density2d),
            Geom::contour().stat(Stat::Count),
            Geom::point().stat(Stat::Sum),
            Geom::line().stat(Stat::Mean),
        ] {
            let err = resolve(&geom, &aes, &cars()).unwrap_err();
            assert!(matches!(err, Error::StatUnavailable(_)), "{geom:?} gave {err:?}");
        }
    }

    #[test]
    fn test_unsupported_stat_reported_before_missing_channels() {
        let err = resolve(&Geom::bar().stat(Stat::Density2d), &Aes::new(), &cars()).unwrap_err();
        match err {
            Error::StatUnavailable(msg) => assert!(msg.contains("bar") && msg.contains("density_2d")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
