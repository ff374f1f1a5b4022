use promo_core::Color;

use super::{dot, ellipsis, Status};
use crate::markup::Element;
use crate::theme::{self, MOBILE_FONT};

const BLUR_PX: u32 = 4;

#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub label: &'static str,
    pub value: &'static str,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct MobileSession {
    pub status: Status,
    pub project: &'static str,
    pub model: &'static str,
    pub summary: &'static str,
    pub messages: u32,
    pub age: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct MobileActivity {
    pub time: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Tab {
    pub icon: &'static str,
    pub label: &'static str,
    pub badge: Option<u32>,
}

/// Everything the phone layout displays.
#[derive(Debug, Clone, Copy)]
pub struct MobileData {
    pub clock: &'static str,
    pub tiles: &'static [Tile],
    pub sessions: &'static [MobileSession],
    pub activity: &'static [MobileActivity],
    pub tabs: &'static [Tab],
    /// Index into `tabs` of the selected tab.
    pub selected_tab: usize,
}

pub const MOBILE: MobileData = MobileData {
    clock: "14:32",
    tiles: &[
        Tile { label: "Projects", value: "12", color: theme::T1 },
        Tile { label: "Active", value: "3", color: theme::GREEN },
        Tile { label: "Sessions", value: "45", color: theme::BLUE },
        Tile { label: "Messages", value: "2.1K", color: theme::PURPLE },
    ],
    sessions: &[
        MobileSession {
            status: Status::Active,
            project: "my-fullstack-project",
            model: "Opus 4.6",
            summary: "Implementing real-time WebSocket dashboard",
            messages: 45,
            age: "now",
        },
        MobileSession {
            status: Status::Active,
            project: "my-fullstack-project",
            model: "Sonnet 4.5",
            summary: "Adding OAuth2 authentication flow",
            messages: 23,
            age: "1m",
        },
        MobileSession {
            status: Status::Recent,
            project: "api-backend-service",
            model: "Opus 4.6",
            summary: "Refactoring database query layer",
            messages: 34,
            age: "4m",
        },
    ],
    activity: &[
        MobileActivity { time: "14:32", text: "Started new session" },
        MobileActivity { time: "14:28", text: "Completed authentication task" },
        MobileActivity { time: "14:25", text: "Created 3 component files" },
    ],
    tabs: &[
        Tab { icon: "\u{25C9}", label: "Overview", badge: None },
        Tab { icon: "\u{25A4}", label: "Projects", badge: Some(3) },
        Tab { icon: "\u{25A5}", label: "Stats", badge: None },
        Tab { icon: "\u{25CE}", label: "Teams", badge: Some(1) },
    ],
    selected_tab: 0,
};

fn blurred(el: Element) -> Element {
    el.decls(theme::redacted(BLUR_PX))
}

fn section_title(text: &str) -> Element {
    Element::div()
        .px("font-size", 13.0)
        .style("font-weight", "600")
        .style("color", theme::T2.to_css())
        .style("text-transform", "uppercase")
        .px("letter-spacing", 0.5)
        .style("margin", "16px 16px 8px")
        .text(text)
}

fn status_bar(d: &MobileData) -> Element {
    Element::div()
        .style("display", "flex")
        .style("justify-content", "space-between")
        .style("align-items", "center")
        .style("padding", "12px 20px 4px")
        .px("font-size", 14.0)
        .style("font-weight", "600")
        .style("color", theme::T1.to_css())
        .child(Element::span().text(d.clock))
        .child(
            Element::span()
                .px("font-size", 12.0)
                .style("color", theme::T2.to_css())
                .text("\u{25AE}\u{25AE}\u{25AE} 5G"),
        )
}

fn app_header() -> Element {
    Element::div()
        .style("display", "flex")
        .style("align-items", "center")
        .style("justify-content", "space-between")
        .style("padding", "10px 16px")
        .style("border-bottom", format!("1px solid {}", theme::BORDER.to_css()))
        .style("background", theme::BG2.to_css())
        .child(
            Element::div()
                .px("font-size", 18.0)
                .style("font-weight", "700")
                .decls(theme::brand_gradient_text(135))
                .text("Claude Monitor"),
        )
        .child(
            Element::div()
                .style("display", "flex")
                .style("align-items", "center")
                .px("gap", 6.0)
                .child(dot(theme::GREEN, Some(6)))
                .child(
                    Element::span()
                        .px("font-size", 11.0)
                        .style("color", theme::T2.to_css())
                        .text("LIVE"),
                ),
        )
}

fn stats_grid(d: &MobileData) -> Element {
    Element::div()
        .style("display", "grid")
        .style("grid-template-columns", "1fr 1fr")
        .px("gap", 10.0)
        .style("padding", "14px 16px 0")
        .children(d.tiles.iter().map(|t| {
            Element::div()
                .style("background", theme::BG2.to_css())
                .style("border", format!("1px solid {}", theme::BORDER.to_css()))
                .px("border-radius", 12.0)
                .style("padding", "12px 14px")
                .child(
                    Element::div()
                        .px("font-size", 24.0)
                        .style("font-weight", "700")
                        .style("color", t.color.to_css())
                        .text(t.value),
                )
                .child(
                    Element::div()
                        .px("font-size", 11.0)
                        .style("color", theme::T3.to_css())
                        .px("margin-top", 2.0)
                        .text(t.label),
                )
        }))
}

fn session_card(s: &MobileSession) -> Element {
    let active = s.status == Status::Active;
    let border = if active {
        theme::GREEN.with_alpha(0.4)
    } else {
        theme::BORDER
    };
    Element::div()
        .style("margin", "0 16px 8px")
        .style("background", theme::BG2.to_css())
        .style("border", format!("1px solid {}", border.to_css()))
        .px("border-radius", 12.0)
        .style("padding", "10px 12px")
        .child(
            Element::div()
                .style("display", "flex")
                .style("align-items", "center")
                .px("gap", 8.0)
                .px("margin-bottom", 4.0)
                .child(dot(s.status.color(), active.then_some(6)))
                .child(blurred(ellipsis(
                    Element::span()
                        .px("font-size", 13.0)
                        .style("font-weight", "600")
                        .style("color", theme::T1.to_css())
                        .num("flex", 1.0),
                ))
                .text(s.project))
                .child(
                    Element::span()
                        .px("font-size", 11.0)
                        .style("color", theme::T3.to_css())
                        .text(s.age),
                ),
        )
        .child(blurred(ellipsis(
            Element::div()
                .px("font-size", 12.0)
                .style("color", theme::T2.to_css())
                .px("margin-left", 16.0),
        ))
        .text(s.summary))
        .child(
            Element::div()
                .style("display", "flex")
                .px("gap", 10.0)
                .style("margin", "4px 0 0 16px")
                .px("font-size", 11.0)
                .child(
                    Element::span()
                        .style("color", theme::PURPLE.to_css())
                        .text(s.model),
                )
                .child(
                    Element::span()
                        .style("color", theme::T3.to_css())
                        .text(format!("{} msgs", s.messages)),
                ),
        )
}

fn activity_list(d: &MobileData) -> Element {
    Element::div()
        .style("margin", "0 16px")
        .style("background", theme::BG2.to_css())
        .style("border", format!("1px solid {}", theme::BORDER.to_css()))
        .px("border-radius", 12.0)
        .style("padding", "4px 12px")
        .children(d.activity.iter().map(|a| {
            Element::div()
                .style("display", "flex")
                .px("gap", 10.0)
                .style("padding", "7px 0")
                .style("border-bottom", format!("1px solid {}", theme::ROW_RULE.to_css()))
                .px("font-size", 12.0)
                .child(
                    Element::span()
                        .style("color", theme::T3.to_css())
                        .px("min-width", 40.0)
                        .text(a.time),
                )
                .child(blurred(Element::span().style("color", theme::T2.to_css())).text(a.text))
        }))
}

fn tab_bar(d: &MobileData) -> Element {
    Element::div()
        .style("position", "absolute")
        .style("left", "0")
        .style("right", "0")
        .style("bottom", "0")
        .px("height", 64.0)
        .style("display", "flex")
        .style("justify-content", "space-around")
        .style("align-items", "center")
        .style("background", theme::BG2.to_css())
        .style("border-top", format!("1px solid {}", theme::BORDER.to_css()))
        .style("padding-bottom", "8px")
        .children(d.tabs.iter().enumerate().map(|(i, tab)| {
            let color = if i == d.selected_tab {
                theme::BLUE
            } else {
                theme::T3
            };
            let mut icon = Element::div()
                .style("position", "relative")
                .px("font-size", 20.0)
                .text(tab.icon);
            if let Some(n) = tab.badge {
                icon = icon.child(
                    Element::span()
                        .style("position", "absolute")
                        .px("top", -4.0)
                        .px("right", -10.0)
                        .px("min-width", 16.0)
                        .px("height", 16.0)
                        .px("border-radius", 8.0)
                        .style("background", theme::RED.to_css())
                        .style("color", "#ffffff")
                        .px("font-size", 10.0)
                        .style("font-weight", "700")
                        .style("display", "flex")
                        .style("align-items", "center")
                        .style("justify-content", "center")
                        .text(n.to_string()),
                );
            }
            Element::div()
                .style("display", "flex")
                .style("flex-direction", "column")
                .style("align-items", "center")
                .px("gap", 2.0)
                .style("color", color.to_css())
                .child(icon)
                .child(Element::div().px("font-size", 10.0).text(tab.label))
        }))
}

/// The 390x844 phone layout.
pub fn mock_mobile() -> Element {
    render(&MOBILE)
}

fn render(d: &MobileData) -> Element {
    let live = section_title("Live Sessions")
        .style("display", "flex")
        .style("align-items", "center")
        .px("gap", 6.0);

    let mut content = Element::div()
        .px("padding-bottom", 80.0)
        .child(app_header())
        .child(stats_grid(d))
        .child(live);
    for s in d.sessions {
        content = content.child(session_card(s));
    }
    content = content
        .child(section_title("Recent Activity"))
        .child(activity_list(d));

    Element::div()
        .style("position", "relative")
        .px("width", 390.0)
        .px("height", 844.0)
        .style("background", theme::BG0.to_css())
        .style("overflow", "hidden")
        .styles(MOBILE_FONT)
        .child(status_bar(d))
        .child(content)
        .child(tab_bar(d))
}
