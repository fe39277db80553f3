//! Picking the marker tags that identify template events.

use crate::error::{EvCopyError, EvCopyResult};
use crate::event::EventTag;

/// Ids of every tag matching one of `markers`, in the order the server listed them.
///
/// Errors when nothing matches: listing events with an empty tag filter would
/// return every event on the site.
pub fn resolve_tag_ids(tags: &[EventTag], markers: &[String]) -> EvCopyResult<Vec<u64>> {
    let ids: Vec<u64> = tags
        .iter()
        .filter(|tag| markers.iter().any(|m| tag.matches(m)))
        .map(|tag| tag.id)
        .collect();

    if ids.is_empty() {
        return Err(EvCopyError::Config(format!(
            "no matching tag found (looked for {})",
            markers
                .iter()
                .map(|m| format!("\"{m}\""))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: u64, name: &str, slug: &str) -> EventTag {
        EventTag {
            id,
            name: name.into(),
            slug: slug.into(),
        }
    }

    fn markers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_template_by_name_or_slug() {
        let tags = vec![tag(1, "Music", "music"), tag(7, "Template", "tpl")];
        assert_eq!(resolve_tag_ids(&tags, &markers(&["template"])).unwrap(), vec![7]);

        let tags = vec![tag(8, "Vorlage", "template")];
        assert_eq!(resolve_tag_ids(&tags, &markers(&["template"])).unwrap(), vec![8]);
    }

    #[test]
    fn several_markers() {
        let tags = vec![
            tag(1, "Recurring", "recurring"),
            tag(2, "Music", "music"),
            tag(3, "template", "template"),
        ];
        assert_eq!(
            resolve_tag_ids(&tags, &markers(&["template", "recurring"])).unwrap(),
            vec![1, 3]
        );
    }

    #[test]
    fn no_match_is_config_error() {
        let tags = vec![tag(1, "Music", "music")];
        let err = resolve_tag_ids(&tags, &markers(&["template"])).unwrap_err();

        assert!(matches!(err, EvCopyError::Config(_)));
        assert!(err.to_string().contains("no matching tag found"));
        assert!(resolve_tag_ids(&[], &markers(&["template"])).is_err());
    }
}
