use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Heading depth of a top-level table of contents entry.
pub const MAJOR_LEVEL: u8 = 2;
/// Heading depth of a nested table of contents entry.
pub const MINOR_LEVEL: u8 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    pub headings: Vec<Heading>,
}

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn is_toc_level(level: u8) -> bool {
    level == MAJOR_LEVEL || level == MINOR_LEVEL
}

/// Anchor id for the `index`-th table of contents heading of a render.
pub fn heading_id(index: usize) -> String {
    format!("heading-{index}")
}

/// Converts markdown to HTML, assigning positional anchor ids to every
/// depth-2 and depth-3 heading. Ids only stay stable within one render.
pub fn render(markdown: &str) -> RenderedDocument {
    let mut events: Vec<Event<'_>> = Parser::new_ext(markdown, options()).collect();

    // (index of the Start event, level, text)
    let mut found: Vec<(usize, u8, String)> = Vec::new();
    let mut open: Option<(usize, u8, String)> = None;
    for (idx, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let level = level_number(*level);
                open = is_toc_level(level).then(|| (idx, level, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, buf)) = open.as_mut() {
                    buf.push_str(text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, _, buf)) = open.as_mut() {
                    buf.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = open.take() {
                    found.push(heading);
                }
            }
            _ => {}
        }
    }

    let mut headings = Vec::with_capacity(found.len());
    for (position, (idx, level, text)) in found.into_iter().enumerate() {
        let id = heading_id(position);
        if let Some(Event::Start(Tag::Heading { id: slot, .. })) = events.get_mut(idx) {
            *slot = Some(CowStr::from(id.clone()));
        }
        headings.push(Heading {
            level,
            text: text.trim().to_string(),
            id,
        });
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    RenderedDocument {
        html: out,
        headings,
    }
}
