use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::models::{Detection, DetectionId, FileKind, User, UserId, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Image,
    Video,
}

impl KindFilter {
    pub fn label(self) -> &'static str {
        match self {
            KindFilter::All => "All types",
            KindFilter::Image => "Images",
            KindFilter::Video => "Videos",
        }
    }

    fn accepts(self, kind: FileKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Image => kind == FileKind::Image,
            KindFilter::Video => kind == FileKind::Video,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum VerdictFilter {
    #[default]
    All,
    Fake,
    Real,
}

impl VerdictFilter {
    pub fn label(self) -> &'static str {
        match self {
            VerdictFilter::All => "All results",
            VerdictFilter::Fake => "Fake",
            VerdictFilter::Real => "Real",
        }
    }

    fn accepts(self, verdict: Verdict) -> bool {
        match self {
            VerdictFilter::All => true,
            VerdictFilter::Fake => verdict == Verdict::Fake,
            VerdictFilter::Real => verdict == Verdict::Real,
        }
    }
}

/// In-memory filter over already fetched detections. Applying it never
/// touches the network and applying it twice gives the same rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetectionFilter {
    pub kind: KindFilter,
    pub verdict: VerdictFilter,
    pub search: String,
}

impl DetectionFilter {
    pub fn is_unfiltered(&self) -> bool {
        self.kind == KindFilter::All && self.verdict == VerdictFilter::All && self.search.trim().is_empty()
    }

    pub fn matches(&self, detection: &Detection) -> bool {
        self.kind.accepts(detection.file_type)
            && self.verdict.accepts(detection.prediction)
            && matches_search(
                &self.search,
                [
                    Some(detection.file_name.as_str()),
                    detection.user_name.as_deref(),
                    detection.user_email.as_deref(),
                ],
            )
    }

    pub fn apply<'a>(&self, items: &'a [Detection]) -> Vec<&'a Detection> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Case-insensitive search over user name and email.
pub fn filter_users<'a>(users: &'a [User], search: &str) -> Vec<&'a User> {
    users
        .iter()
        .filter(|user| matches_search(search, [Some(user.name.as_str()), Some(user.email.as_str())]))
        .collect()
}

/// Row dropped from the admin tables after a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    User(UserId),
    Detection(DetectionId),
}

impl Removal {
    /// Drops the deleted row from whichever collections are loaded. A
    /// deleted user takes their detections along.
    pub fn apply(self, users: Option<&mut Vec<User>>, detections: Option<&mut Vec<Detection>>) {
        match self {
            Removal::User(id) => {
                if let Some(users) = users {
                    users.retain(|user| user.id != id);
                }
                if let Some(detections) = detections {
                    detections.retain(|detection| detection.user_id != Some(id));
                }
            }
            Removal::Detection(id) => {
                if let Some(detections) = detections {
                    detections.retain(|detection| detection.id != id);
                }
            }
        }
    }
}

fn matches_search<'a>(search: &str, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(id: u64, name: &str, kind: FileKind, verdict: Verdict) -> Detection {
        Detection {
            id: DetectionId(id),
            user_id: Some(UserId(1)),
            file_name: name.into(),
            file_type: kind,
            prediction: verdict,
            confidence: 75.0,
            processing_time: None,
            created_at: None,
            metadata: None,
            user_name: Some("Grace Hopper".into()),
            user_email: Some("grace@navy.mil".into()),
        }
    }

    fn sample() -> Vec<Detection> {
        vec![
            detection(1, "beach.png", FileKind::Image, Verdict::Real),
            detection(2, "speech.mp4", FileKind::Video, Verdict::Fake),
            detection(3, "portrait.jpg", FileKind::Image, Verdict::Fake),
            detection(4, "interview.mov", FileKind::Video, Verdict::Real),
            detection(5, "broken.png", FileKind::Image, Verdict::Unknown),
        ]
    }

    fn ids(items: &[&Detection]) -> Vec<u64> {
        items.iter().map(|item| item.id.0).collect()
    }

    #[test]
    fn all_all_returns_everything() {
        let items = sample();
        let filter = DetectionFilter::default();
        assert!(filter.is_unfiltered());
        assert_eq!(ids(&filter.apply(&items)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn specific_filters_return_matching_subset_in_order() {
        let items = sample();
        let filter = DetectionFilter {
            kind: KindFilter::Image,
            verdict: VerdictFilter::Fake,
            search: String::new(),
        };
        let rows = filter.apply(&items);
        assert_eq!(ids(&rows), vec![3]);
        assert!(rows.iter().all(|row| row.file_type == FileKind::Image && row.is_fake()));

        let videos = DetectionFilter {
            kind: KindFilter::Video,
            ..DetectionFilter::default()
        };
        assert_eq!(ids(&videos.apply(&items)), vec![2, 4]);
    }

    #[test]
    fn unknown_verdicts_only_show_unfiltered() {
        let items = sample();
        for verdict in [VerdictFilter::Fake, VerdictFilter::Real] {
            let filter = DetectionFilter {
                verdict,
                ..DetectionFilter::default()
            };
            assert!(!ids(&filter.apply(&items)).contains(&5));
        }
    }

    #[test]
    fn applying_twice_is_stable() {
        let items = sample();
        let filter = DetectionFilter {
            kind: KindFilter::All,
            verdict: VerdictFilter::Real,
            search: "".into(),
        };
        let once: Vec<Detection> = filter.apply(&items).into_iter().cloned().collect();
        let twice = filter.apply(&once);
        assert_eq!(ids(&twice), vec![1, 4]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_user() {
        let items = sample();
        let by_file = DetectionFilter {
            search: "  SPEECH ".into(),
            ..DetectionFilter::default()
        };
        assert_eq!(ids(&by_file.apply(&items)), vec![2]);

        let by_user = DetectionFilter {
            search: "navy.mil".into(),
            ..DetectionFilter::default()
        };
        assert_eq!(by_user.apply(&items).len(), items.len());
    }

    #[test]
    fn filters_parse_from_select_values() {
        assert_eq!("video".parse::<KindFilter>(), Ok(KindFilter::Video));
        assert_eq!("fake".parse::<VerdictFilter>(), Ok(VerdictFilter::Fake));
        assert_eq!(VerdictFilter::All.as_ref(), "all");
    }

    #[test]
    fn user_search() {
        let users: Vec<User> = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Ann Lee", "email": "ann@example.com", "role": "user"},
            {"id": 2, "name": "Bo", "email": "bo@corp.io", "role": "admin"}
        ]))
        .unwrap();
        assert_eq!(filter_users(&users, "").len(), 2);
        assert_eq!(filter_users(&users, "CORP")[0].id, UserId(2));
        assert!(filter_users(&users, "zzz").is_empty());
    }

    fn users() -> Vec<User> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Grace Hopper", "email": "grace@navy.mil"},
            {"id": 2, "name": "Alan Turing", "email": "alan@bletchley.uk"}
        ]))
        .unwrap()
    }

    #[test]
    fn deleted_detection_leaves_the_table() {
        let mut items = sample();
        Removal::Detection(DetectionId(3)).apply(None, Some(&mut items));
        assert_eq!(ids(&items.iter().collect::<Vec<_>>()), vec![1, 2, 4, 5]);

        Removal::Detection(DetectionId(42)).apply(None, Some(&mut items));
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn deleted_user_takes_their_detections() {
        let mut people = users();
        let mut items = sample();
        items[1].user_id = Some(UserId(2));
        items[4].user_id = None;

        Removal::User(UserId(1)).apply(Some(&mut people), Some(&mut items));

        assert!(people.iter().all(|user| user.id != UserId(1)));
        assert_eq!(people.len(), 1);
        assert_eq!(ids(&items.iter().collect::<Vec<_>>()), vec![2, 5]);
    }

    #[test]
    fn removal_skips_tables_not_loaded_yet() {
        let mut people = users();
        Removal::User(UserId(2)).apply(Some(&mut people), None);
        assert_eq!(people.len(), 1);
    }
}
