//! HTML writer for paged documents.
//!
//! Produces the body markup only: one `.page` element per page, one
//! `.section` element per placement. Styling lives in `render::container`
//! and in each template's stylesheet.

use crate::layout::pagination::{PagedDocument, Placement};
use crate::render::document::{Item, ItemKind, SectionLayout};

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escaped text with line breaks kept as `<br>`.
fn multiline(text: &str) -> String {
    text.lines().map(escape).collect::<Vec<_>>().join("<br>")
}

pub fn write_pages(paged: &PagedDocument) -> String {
    let mut out = String::new();
    for page in &paged.pages {
        out.push_str(&format!(
            "<div class=\"page\" data-page=\"{}\">",
            page.number
        ));
        for placement in &page.placements {
            write_placement(&mut out, placement);
        }
        out.push_str("</div>");
    }
    out
}

fn section_classes(placement: &Placement) -> String {
    let section = &placement.section;
    let mut classes = vec![
        "section".to_string(),
        format!("section-{}", escape(section.id.as_str())),
    ];
    classes.push(
        match section.layout {
            SectionLayout::Header => "section-header",
            SectionLayout::Stacked => "layout-stacked",
            SectionLayout::Inline => "layout-inline",
            SectionLayout::Grid { .. } => "layout-grid",
            SectionLayout::Tags => "layout-tags",
        }
        .to_string(),
    );
    if placement.splittable {
        classes.push("splittable".to_string());
    }
    if placement.page_break_before {
        classes.push("page-break-before".to_string());
    }
    if section.continued {
        classes.push("continued".to_string());
    }
    classes.join(" ")
}

fn write_placement(out: &mut String, placement: &Placement) {
    let section = &placement.section;
    out.push_str(&format!(
        "<section class=\"{}\" data-section=\"{}\">",
        section_classes(placement),
        escape(section.id.as_str())
    ));
    if let Some(heading) = &section.heading {
        out.push_str(&format!("<h2>{}</h2>", escape(heading)));
    }

    match section.layout {
        SectionLayout::Header | SectionLayout::Stacked => {
            for item in &section.items {
                write_item(out, item);
            }
        }
        SectionLayout::Inline => {
            let joined = section
                .items
                .iter()
                .map(|i| escape(&i.title))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("<p class=\"inline-list\">{joined}</p>"));
        }
        SectionLayout::Grid { columns } => {
            out.push_str(&format!(
                "<div class=\"grid\" style=\"grid-template-columns: repeat({}, 1fr)\">",
                columns.max(1)
            ));
            for item in &section.items {
                out.push_str(&format!("<div class=\"cell\">{}</div>", escape(&item.title)));
            }
            out.push_str("</div>");
        }
        SectionLayout::Tags => {
            write_tags(out, section.items.iter().map(|i| i.title.as_str()));
        }
    }

    out.push_str("</section>");
}

fn write_tags<'a>(out: &mut String, tags: impl Iterator<Item = &'a str>) {
    out.push_str("<ul class=\"tags\">");
    for tag in tags {
        out.push_str(&format!("<li class=\"tag\">{}</li>", escape(tag)));
    }
    out.push_str("</ul>");
}

fn kind_class(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Name => "name",
        ItemKind::Contact => "contact",
        ItemKind::Summary => "summary",
        ItemKind::Experience => "experience",
        ItemKind::Education => "education",
        ItemKind::Skill => "skill",
        ItemKind::Project => "project",
        ItemKind::Custom => "custom",
    }
}

fn write_item(out: &mut String, item: &Item) {
    match item.kind {
        ItemKind::Name => out.push_str(&format!("<h1 class=\"name\">{}</h1>", escape(&item.title))),
        ItemKind::Contact => out.push_str(&format!(
            "<div class=\"item-contact\">{}</div>",
            escape(&item.title)
        )),
        ItemKind::Summary => out.push_str(&format!(
            "<p class=\"item-summary\">{}</p>",
            multiline(&item.title)
        )),
        kind => {
            out.push_str(&format!("<div class=\"item item-{}\">", kind_class(kind)));
            if !item.title.is_empty() {
                out.push_str(&format!(
                    "<div class=\"item-title\">{}</div>",
                    escape(&item.title)
                ));
            }
        }
    }

    if let Some(subtitle) = &item.subtitle {
        out.push_str(&format!(
            "<div class=\"item-subtitle\">{}</div>",
            escape(subtitle)
        ));
    }
    if let Some(meta) = &item.meta {
        out.push_str(&format!("<div class=\"item-meta\">{}</div>", escape(meta)));
    }
    if let Some(body) = &item.body {
        out.push_str(&format!("<p class=\"item-body\">{}</p>", multiline(body)));
    }
    if !item.tags.is_empty() {
        write_tags(out, item.tags.iter().map(String::as_str));
    }

    if !matches!(
        item.kind,
        ItemKind::Name | ItemKind::Contact | ItemKind::Summary
    ) {
        out.push_str("</div>");
    }
}
