/// HTML backend for `DisplayTree`.
///
/// Produces the inner markup of the approaches grid using the handbook's
/// Tailwind classes. Every catalog-provided string is escaped.
use std::fmt::Write;

use crate::render::{BadgeColor, Card, DisplayTree, EmptyState, Thumbnail};

const CLOCK_ICON: &str = r#"<svg class="w-3.5 h-3.5" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 8v4l3 3m6-3a9 9 0 11-18 0 9 9 0 0118 0z"></path></svg>"#;
const ARROW_ICON: &str = r#"<svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 7l5 5m0 0l-5 5m5-5H6"></path></svg>"#;

/// Render the grid contents for `tree`.
pub fn render_html(tree: &DisplayTree) -> String {
    match tree {
        DisplayTree::Error { message } => format!(
            r#"<p class="text-center text-red-400 col-span-full">{}</p>"#,
            escape(message)
        ),
        DisplayTree::Empty { placeholder, .. } => render_empty(placeholder),
        DisplayTree::Cards { cards, .. } => {
            let mut out = String::new();
            for card in cards {
                render_card(&mut out, card);
            }
            out
        }
    }
}

fn render_empty(placeholder: &EmptyState) -> String {
    format!(
        concat!(
            r#"<div class="col-span-full text-center py-12">"#,
            r#"<div class="text-6xl mb-4">{icon}</div>"#,
            r#"<h3 class="text-2xl font-bold mb-4">{heading}</h3>"#,
            r#"<p class="mb-6">{hint}</p>"#,
            r#"<button data-action="reset-filters" class="btn-primary">{reset}</button>"#,
            "</div>"
        ),
        icon = escape(&placeholder.icon),
        heading = escape(&placeholder.heading),
        hint = escape(&placeholder.hint),
        reset = escape(&placeholder.reset_label),
    )
}

fn render_card(out: &mut String, card: &Card) {
    let featured_class = if card.featured { " featured" } else { "" };
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"<a href="{href}" class="card group relative transition-all duration-300 overflow-hidden{featured_class}" data-aos="fade-up">"#,
        href = escape(&card.href),
    );

    match &card.thumbnail {
        Thumbnail::Image { src, alt } => {
            let _ = write!(
                out,
                r#"<div class="relative h-40 overflow-hidden"><img src="{}" alt="{}" class="w-full h-full object-cover group-hover:scale-105 transition-transform duration-300">"#,
                escape(src),
                escape(alt),
            );
        }
        Thumbnail::Icon { glyph, gradient } => {
            let _ = write!(
                out,
                r#"<div class="relative h-40 overflow-hidden bg-gradient-to-br {}"><span class="flex items-center justify-center h-full text-6xl">{}</span>"#,
                escape(gradient),
                escape(glyph),
            );
        }
    }
    if card.featured {
        out.push_str(r#"<div class="absolute top-3 right-3"><span class="px-3 py-1 bg-yellow-400 text-yellow-900 text-xs font-bold rounded-full shadow-lg">Featured</span></div>"#);
    }
    out.push_str("</div>");

    let _ = write!(
        out,
        concat!(
            r#"<div class="p-5"><div class="flex items-center gap-2 mb-3">"#,
            r#"<span class="text-xs flex items-center gap-1" style="color: var(--text-tertiary);">{clock}{read_time}</span>"#,
            r#"<span class="px-2 py-0.5 text-xs font-semibold rounded-full {badge}">{difficulty}</span>"#,
            "</div>",
            r#"<h3 class="text-lg font-bold mb-2 group-hover:text-teal-400 transition-colors line-clamp-2">{title}</h3>"#,
            r#"<p class="text-sm mb-3 line-clamp-2">{preview}</p>"#,
            r#"<div class="flex flex-wrap gap-1.5">"#,
        ),
        clock = CLOCK_ICON,
        read_time = escape(&card.read_time),
        badge = badge_classes(card.difficulty.color),
        difficulty = escape(&card.difficulty.label),
        title = escape(&card.title),
        preview = escape(&card.short_description),
    );
    for tag in &card.tags {
        let _ = write!(
            out,
            r#"<span class="px-2 py-0.5 text-xs rounded-md" style="background-color: rgba(34, 211, 238, 0.1); border: 1px solid rgba(34, 211, 238, 0.2);">{}</span>"#,
            escape(tag)
        );
    }
    let _ = write!(
        out,
        r#"</div></div><div class="absolute bottom-4 right-4 opacity-0 group-hover:opacity-100 transition-opacity" style="color: var(--primary-400);">{ARROW_ICON}</div></a>"#
    );
}

fn badge_classes(color: BadgeColor) -> &'static str {
    match color {
        BadgeColor::Green => "bg-green-900 text-green-200",
        BadgeColor::Blue => "bg-blue-900 text-blue-200",
        BadgeColor::Purple => "bg-purple-900 text-purple-200",
        BadgeColor::Neutral => "bg-gray-800 text-gray-200",
    }
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
