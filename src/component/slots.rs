//! Slot projection: moving caller-authored content from the placeholder
//! into the slot points of a freshly parsed definition.
//!
//! Named slots move first, consuming matching templates out of the
//! placeholder; whatever the placeholder still holds afterwards becomes the
//! default slot content. Projection runs after scope tagging, so projected
//! nodes keep the caller's scope attributes, not the definition's.

use tracing::warn;

use crate::document::Document;
use crate::dom::{MarkupError, NodeId};

use super::ATTR_SLOT;

/// Fill every named slot point (`[data-s="name"]`, non-empty name) in the
/// mounted subtree from the placeholder's matching templates.
///
/// The template element itself is discarded; only its children move. A slot
/// point with no matching template is dropped from the subtree.
pub(crate) fn project_named(doc: &mut Document, root: NodeId, placeholder: NodeId) {
    let points: Vec<NodeId> = doc
        .dom
        .query_attr(root, ATTR_SLOT)
        .into_iter()
        .filter(|&id| {
            doc.dom
                .get(id)
                .and_then(|data| data.attr(ATTR_SLOT))
                .is_some_and(|name| !name.is_empty())
        })
        .collect();

    for point in points {
        let Some(name) = doc
            .dom
            .get(point)
            .and_then(|data| data.attr(ATTR_SLOT))
            .map(str::to_string)
        else {
            continue;
        };

        let template = doc
            .dom
            .query_attr_eq(placeholder, ATTR_SLOT, &name)
            .into_iter()
            .next();
        match template {
            Some(template) => {
                let content = doc.dom.children(template).to_vec();
                doc.dom.replace_with_fragment(point, &content);
                doc.dom.remove(template);
            }
            None => {
                warn!(slot = %name, "no template provided for named slot; dropping slot point");
                doc.dom.remove(point);
            }
        }
    }
}

/// Fill the default slot point (`[data-s=""]`, empty name) from whatever
/// markup the placeholder still contains after named projection.
///
/// The placeholder content is re-serialized and parsed fresh, so the default
/// slot holds copies detached from the placeholder subtree.
pub(crate) fn project_default(
    doc: &mut Document,
    root: NodeId,
    placeholder: NodeId,
) -> Result<(), MarkupError> {
    let point = doc
        .dom
        .query_attr(root, ATTR_SLOT)
        .into_iter()
        .find(|&id| {
            doc.dom
                .get(id)
                .and_then(|data| data.attr(ATTR_SLOT))
                .is_some_and(str::is_empty)
        });
    let Some(point) = point else {
        return Ok(());
    };

    if doc.dom.get(placeholder).is_none_or(|data| !data.is_element()) {
        doc.dom.remove(point);
        return Ok(());
    }

    let markup = doc.inner_markup(placeholder);
    if markup.trim().is_empty() {
        doc.dom.remove(point);
        return Ok(());
    }

    let content = doc.parse_fragment(&markup)?;
    doc.dom.replace_with_fragment(point, &content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(definition_markup: &str, placeholder_markup: &str) -> (Document, NodeId, NodeId) {
        let mut doc = Document::with_body(placeholder_markup).unwrap();
        let placeholder = doc.dom.children(doc.body())[0];
        let parsed = doc.parse_fragment(definition_markup).unwrap();
        let root = parsed[0];
        (doc, root, placeholder)
    }

    #[test]
    fn named_slot_receives_template_children() {
        let (mut doc, root, placeholder) = setup(
            r#"<main><div data-s="header"></div></main>"#,
            r#"<div><template data-s="header"><h1>Hi</h1><p>sub</p></template></div>"#,
        );
        project_named(&mut doc, root, placeholder);
        assert_eq!(doc.inner_markup(root), "<h1>Hi</h1><p>sub</p>");
        // The template wrapper is consumed.
        assert_eq!(doc.inner_markup(placeholder), "");
    }

    #[test]
    fn missing_template_drops_slot_point() {
        let (mut doc, root, placeholder) = setup(
            r#"<main><p>keep</p><div data-s="aside"></div></main>"#,
            "<div></div>",
        );
        project_named(&mut doc, root, placeholder);
        assert_eq!(doc.inner_markup(root), "<p>keep</p>");
    }

    #[test]
    fn two_named_slots_projected_independently() {
        let (mut doc, root, placeholder) = setup(
            r#"<main><div data-s="top"></div><div data-s="bottom"></div></main>"#,
            r#"<div><template data-s="bottom"><i>b</i></template><template data-s="top"><b>t</b></template></div>"#,
        );
        project_named(&mut doc, root, placeholder);
        assert_eq!(doc.inner_markup(root), "<b>t</b><i>b</i>");
    }

    #[test]
    fn default_slot_receives_leftover_content() {
        let (mut doc, root, placeholder) = setup(
            r#"<main><div data-s=""></div></main>"#,
            "<div><p>one</p><p>two</p></div>",
        );
        project_default(&mut doc, root, placeholder).unwrap();
        assert_eq!(doc.inner_markup(root), "<p>one</p><p>two</p>");
    }

    #[test]
    fn default_slot_after_named_projection_sees_remainder() {
        let (mut doc, root, placeholder) = setup(
            r#"<main><div data-s="side"></div><section data-s=""></section></main>"#,
            r#"<div><template data-s="side"><nav></nav></template><p>rest</p></div>"#,
        );
        project_named(&mut doc, root, placeholder);
        project_default(&mut doc, root, placeholder).unwrap();
        assert_eq!(doc.inner_markup(root), "<nav></nav><p>rest</p>");
    }

    #[test]
    fn empty_placeholder_drops_default_slot_point() {
        let (mut doc, root, placeholder) = setup(
            r#"<main><div data-s=""></div><p>after</p></main>"#,
            "<div>   </div>",
        );
        project_default(&mut doc, root, placeholder).unwrap();
        assert_eq!(doc.inner_markup(root), "<p>after</p>");
    }

    #[test]
    fn no_slot_points_is_a_no_op() {
        let (mut doc, root, placeholder) =
            setup("<main><p>static</p></main>", "<div><p>unused</p></div>");
        project_named(&mut doc, root, placeholder);
        project_default(&mut doc, root, placeholder).unwrap();
        assert_eq!(doc.inner_markup(root), "<p>static</p>");
    }

    #[test]
    fn default_slot_preserves_quoted_attribute_values() {
        // Projection re-serializes and reparses the placeholder content, so
        // a value holding a literal '"' must survive the round trip.
        let (mut doc, root, placeholder) = setup(
            r#"<main><div data-s=""></div></main>"#,
            r#"<div><a title='say "hi"'>x</a></div>"#,
        );
        project_default(&mut doc, root, placeholder).unwrap();
        let link = doc.dom.children(root)[0];
        assert_eq!(doc.dom.get(link).unwrap().attr("title"), Some(r#"say "hi""#));
    }

    #[test]
    fn default_slot_content_is_a_detached_copy() {
        let (mut doc, root, placeholder) = setup(
            r#"<main><div data-s=""></div></main>"#,
            "<div><p>shared</p></div>",
        );
        project_default(&mut doc, root, placeholder).unwrap();
        // Placeholder content is untouched; the slot holds fresh nodes.
        assert_eq!(doc.inner_markup(placeholder), "<p>shared</p>");
        assert_eq!(doc.inner_markup(root), "<p>shared</p>");
        let in_slot = doc.dom.children(root)[0];
        let in_placeholder = doc.dom.children(placeholder)[0];
        assert_ne!(in_slot, in_placeholder);
    }
}
