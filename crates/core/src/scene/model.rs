//! Input records as delivered by the meditation network app
//!
//! Field names follow the app's JSON (`isCurrentUser`, `currentUserId`).
//! Ids may arrive as strings or numbers; both are normalised to text.

use crate::error::SceneError;
use crate::geo::GeoPoint;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Participant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ParticipantId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawId> for ParticipantId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Float(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        }
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> String {
        id.0
    }
}

impl ParticipantId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A meditating participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    /// `[latitude, longitude]` in degrees
    pub coordinates: [f64; 2],
    #[serde(default)]
    pub is_current_user: bool,
}

impl Participant {
    #[must_use]
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: ParticipantId::new(id),
            coordinates: [latitude, longitude],
            is_current_user: false,
        }
    }

    /// Mark this participant as the viewing user.
    #[must_use]
    pub fn current_user(mut self) -> Self {
        self.is_current_user = true;
        self
    }

    #[must_use]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::from(self.coordinates)
    }
}

/// A meditation triangle: members connected in list order, last back to first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// CSS colour: hex, `rgb(...)` or a common colour name (see
    /// [`Rgb::from_css`](crate::core_types::Rgb::from_css)). Anything else
    /// is drawn in the fallback grey.
    pub color: String,
    pub members: Vec<Participant>,
}

impl Triangle {
    #[must_use]
    pub fn new(color: impl Into<String>, members: Vec<Participant>) -> Self {
        Self {
            color: color.into(),
            members,
        }
    }

    /// Cyclic member pairs `(m[i], m[(i + 1) % n])`.
    ///
    /// A single member pairs with itself; an empty triangle yields nothing.
    pub fn edges(&self) -> impl Iterator<Item = (&Participant, &Participant)> + '_ {
        let n = self.members.len();
        (0..n).map(move |i| (&self.members[i], &self.members[(i + 1) % n]))
    }
}

/// Everything the space view renders
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneData {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub triangles: Vec<Triangle>,
    /// Id of the viewing user, when the app knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_id: Option<ParticipantId>,
}

impl SceneData {
    #[must_use]
    pub fn new(participants: Vec<Participant>, triangles: Vec<Triangle>) -> Self {
        Self {
            participants,
            triangles,
            current_user_id: None,
        }
    }

    /// Parse scene data from the app's JSON.
    ///
    /// # Errors
    /// Returns `ParseFailed` for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|e| SceneError::ParseFailed(e.to_string()))
    }

    /// Load scene data from a JSON file.
    ///
    /// # Errors
    /// Returns `LoadFailed` if the file can't be read, `ParseFailed` if it
    /// isn't valid scene JSON.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SceneError::LoadFailed(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&contents)
    }

    /// Optional ingestion check. The scene builder never requires it.
    ///
    /// # Errors
    /// Returns `InvalidData` for non-finite coordinates or duplicate
    /// participant ids.
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut seen = FxHashSet::default();
        for p in &self.participants {
            if !seen.insert(&p.id) {
                return Err(SceneError::InvalidData(format!(
                    "duplicate participant id '{}'",
                    p.id
                )));
            }
            check_coordinates(p, "participant")?;
        }
        for (index, triangle) in self.triangles.iter().enumerate() {
            for member in &triangle.members {
                check_coordinates(member, &format!("member of triangle {index}"))?;
            }
        }
        Ok(())
    }

    /// Whether `participant` is the viewing user, by flag or by id.
    #[must_use]
    pub fn is_current_user(&self, participant: &Participant) -> bool {
        participant.is_current_user || self.current_user_id.as_ref() == Some(&participant.id)
    }

    /// Ids of everyone belonging to at least one triangle.
    #[must_use]
    pub fn triangle_member_ids(&self) -> FxHashSet<&ParticipantId> {
        self.triangles
            .iter()
            .flat_map(|t| t.members.iter().map(|m| &m.id))
            .collect()
    }

    /// Participants not in any triangle, in participant-list order.
    #[must_use]
    pub fn waiting_participants(&self) -> Vec<&Participant> {
        let members = self.triangle_member_ids();
        self.participants
            .iter()
            .filter(|p| !members.contains(&p.id))
            .collect()
    }
}

fn check_coordinates(p: &Participant, what: &str) -> Result<(), SceneError> {
    if p.location().is_finite() {
        Ok(())
    } else {
        Err(SceneError::InvalidData(format!(
            "{what} '{}' has non-finite coordinates {:?}",
            p.id, p.coordinates
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_JSON: &str = r##"{
        "participants": [
            { "id": 1, "coordinates": [48.85, 2.35], "isCurrentUser": true },
            { "id": "b", "coordinates": [40.71, -74.0] },
            { "id": "c", "coordinates": [-33.87, 151.21] },
            { "id": "d", "coordinates": [35.68, 139.69] }
        ],
        "triangles": [
            {
                "color": "#4caf50",
                "members": [
                    { "id": 1, "coordinates": [48.85, 2.35] },
                    { "id": "b", "coordinates": [40.71, -74.0] },
                    { "id": "c", "coordinates": [-33.87, 151.21] }
                ]
            }
        ],
        "currentUserId": "1"
    }"##;

    #[test]
    fn test_parse_app_json() {
        let data = SceneData::from_json_str(APP_JSON).unwrap();
        assert_eq!(data.participants.len(), 4);
        assert_eq!(data.participants[0].id, ParticipantId::from("1"));
        assert!(data.participants[0].is_current_user);
        assert!(!data.participants[1].is_current_user);
        assert_eq!(data.triangles[0].members.len(), 3);
        assert_eq!(data.current_user_id, Some(ParticipantId::from("1")));
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_waiting_participants_by_id() {
        let data = SceneData::from_json_str(APP_JSON).unwrap();
        let waiting = data.waiting_participants();
        assert_eq!(waiting.len(), 1);
        assert_eq!(waiting[0].id.as_str(), "d");
    }

    #[test]
    fn test_current_user_by_id() {
        let mut data = SceneData::new(vec![Participant::new("x", 0.0, 0.0)], vec![]);
        assert!(!data.is_current_user(&data.participants[0]));
        data.current_user_id = Some("x".into());
        assert!(data.is_current_user(&data.participants[0]));
    }

    #[test]
    fn test_cyclic_edges() {
        let t = Triangle::new(
            "#fff",
            vec![
                Participant::new("a", 0.0, 0.0),
                Participant::new("b", 0.0, 10.0),
                Participant::new("c", 10.0, 0.0),
                Participant::new("d", 10.0, 10.0),
            ],
        );
        let pairs: Vec<_> = t
            .edges()
            .map(|(a, b)| (a.id.as_str(), b.id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);

        let single = Triangle::new("#fff", vec![Participant::new("solo", 0.0, 0.0)]);
        assert_eq!(single.edges().count(), 1);
        assert_eq!(Triangle::new("#fff", vec![]).edges().count(), 0);
    }

    #[test]
    fn test_validate_rejects_duplicates_and_nan() {
        let dup = SceneData::new(
            vec![Participant::new("a", 0.0, 0.0), Participant::new("a", 1.0, 1.0)],
            vec![],
        );
        assert!(matches!(dup.validate(), Err(SceneError::InvalidData(ref m)) if m.contains("duplicate")));

        let nan = SceneData::new(vec![Participant::new("a", f64::NAN, 0.0)], vec![]);
        assert!(matches!(nan.validate(), Err(SceneError::InvalidData(_))));
    }

    #[test]
    fn test_ids_serialize_as_text() {
        let p = Participant::new("42", 1.0, 2.0).current_user();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"id":"42","coordinates":[1.0,2.0],"isCurrentUser":true}"#);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let data = SceneData::from_json_str("{}").unwrap();
        assert!(data.participants.is_empty());
        assert!(data.triangles.is_empty());
    }
}
