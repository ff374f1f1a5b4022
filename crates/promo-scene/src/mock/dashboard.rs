use promo_core::Color;

use super::{badge, dot, ellipsis, Status};
use crate::markup::{pct, Element};
use crate::theme::{self, DASHBOARD_FONT};

const BLUR_PX: u32 = 5;

#[derive(Debug, Clone, Copy)]
pub struct Counter {
    pub label: &'static str,
    pub value: &'static str,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionRow {
    pub status: Status,
    pub model: &'static str,
    pub branch: Option<&'static str>,
    pub summary: &'static str,
    pub prompt: &'static str,
    pub messages: u32,
    pub size: &'static str,
    pub tool: Option<&'static str>,
    /// Input / output token totals.
    pub tokens: Option<(&'static str, &'static str)>,
    pub show_conversation: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectCard {
    pub status: Status,
    pub active: Option<u32>,
    pub recent: Option<u32>,
    pub total: u32,
    pub name: &'static str,
    pub path: &'static str,
    pub sessions: &'static [SessionRow],
    pub idle_sessions: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
pub struct StatRow {
    pub label: &'static str,
    pub value: &'static str,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy)]
pub struct ModelBar {
    pub name: &'static str,
    pub percent: f64,
    pub gradient: (Color, Color),
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Activity {
    pub time: &'static str,
    pub text: &'static str,
    pub project: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct TeamMember {
    pub name: &'static str,
    pub kind: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ConversationTurn {
    pub role: &'static str,
    pub color: Color,
    pub text: &'static str,
}

/// Everything the desktop dashboard displays.
#[derive(Debug, Clone, Copy)]
pub struct DashboardData {
    pub clock: &'static str,
    pub counters: &'static [Counter],
    pub filters: &'static [&'static str],
    pub visible_projects: &'static str,
    pub projects: &'static [ProjectCard],
    pub conversation: &'static [ConversationTurn],
    pub stats: &'static [StatRow],
    pub models: &'static [ModelBar],
    /// Messages per hour, midnight first.
    pub hourly: [u32; 24],
    pub activity: &'static [Activity],
    pub tasks: (u32, u32, u32),
    pub team: &'static str,
    pub members: &'static [TeamMember],
}

pub const DASHBOARD: DashboardData = DashboardData {
    clock: "14:32:08",
    counters: &[
        Counter { label: "Projects", value: "12", color: theme::T1 },
        Counter { label: "Active", value: "3", color: theme::GREEN },
        Counter { label: "Recent", value: "5", color: theme::ORANGE },
        Counter { label: "Sessions", value: "45", color: theme::BLUE },
        Counter { label: "Msgs", value: "2.1K", color: theme::T1 },
    ],
    filters: &["Active", "Recent", "All Projects"],
    visible_projects: "8 / 12 projects",
    projects: &[
        ProjectCard {
            status: Status::Active,
            active: Some(2),
            recent: None,
            total: 8,
            name: "my-fullstack-project",
            path: "C:\\Users\\dev\\projects\\my-fullstack-project",
            sessions: &[
                SessionRow {
                    status: Status::Active,
                    model: "Opus 4.6",
                    branch: Some("main"),
                    summary: "Implementing real-time WebSocket monitoring dashboard",
                    prompt: "Add the WebSocket endpoint that streams session data every 3 seconds",
                    messages: 45,
                    size: "128K",
                    tool: Some("Edit src/components/Dashboard.tsx"),
                    tokens: Some(("856K", "124K")),
                    show_conversation: true,
                },
                SessionRow {
                    status: Status::Active,
                    model: "Sonnet 4.5",
                    branch: Some("feature/auth"),
                    summary: "Adding OAuth2 authentication flow",
                    prompt: "Create the login page with Google OAuth integration",
                    messages: 23,
                    size: "64K",
                    tool: Some("Write auth/providers.ts"),
                    tokens: Some(("432K", "67K")),
                    show_conversation: false,
                },
            ],
            idle_sessions: None,
        },
        ProjectCard {
            status: Status::Recent,
            active: None,
            recent: Some(1),
            total: 5,
            name: "api-backend-service",
            path: "C:\\Users\\dev\\projects\\api-backend-service",
            sessions: &[SessionRow {
                status: Status::Recent,
                model: "Opus 4.6",
                branch: None,
                summary: "Refactoring database query layer for performance",
                prompt: "Optimize the user search query to use indexes",
                messages: 34,
                size: "96K",
                tool: Some("Read prisma/schema.prisma"),
                tokens: Some(("654K", "98K")),
                show_conversation: false,
            }],
            idle_sessions: Some(4),
        },
        ProjectCard {
            status: Status::Idle,
            active: None,
            recent: None,
            total: 3,
            name: "design-system-lib",
            path: "C:\\Users\\dev\\packages\\design-system-lib",
            sessions: &[],
            idle_sessions: Some(3),
        },
        ProjectCard {
            status: Status::Idle,
            active: None,
            recent: None,
            total: 6,
            name: "data-pipeline-tools",
            path: "D:\\work\\data-pipeline-tools",
            sessions: &[],
            idle_sessions: Some(6),
        },
    ],
    conversation: &[
        ConversationTurn { role: "U", color: theme::BLUE, text: "Help me implement the login feature..." },
        ConversationTurn { role: "A", color: theme::PURPLE, text: "I'll create the authentication module with..." },
        ConversationTurn { role: "T", color: theme::ORANGE, text: "(tool result)" },
    ],
    stats: &[
        StatRow { label: "Total Sessions", value: "156", color: None },
        StatRow { label: "Total Messages", value: "2,148", color: None },
        StatRow { label: "Since", value: "12/15/2025", color: None },
        StatRow { label: "Longest", value: "4h 32m", color: None },
        StatRow { label: "Today Msgs", value: "87", color: Some(theme::ORANGE) },
        StatRow { label: "Today Tools", value: "234", color: Some(theme::PURPLE) },
    ],
    models: &[
        ModelBar {
            name: "Opus 4.6",
            percent: 100.0,
            gradient: (Color::from_rgb_u32(0x6e40c9), Color::from_rgb_u32(0xbc8cff)),
            value: "1.2M out",
        },
        ModelBar {
            name: "Sonnet 4.5",
            percent: 65.0,
            gradient: (Color::from_rgb_u32(0x1f6feb), Color::from_rgb_u32(0x58a6ff)),
            value: "780K out",
        },
        ModelBar {
            name: "Haiku 4.5",
            percent: 25.0,
            gradient: (Color::from_rgb_u32(0x238636), Color::from_rgb_u32(0x3fb950)),
            value: "310K out",
        },
    ],
    hourly: [2, 1, 0, 0, 0, 1, 5, 12, 18, 22, 15, 20, 25, 18, 14, 16, 20, 24, 19, 12, 8, 6, 4, 3],
    activity: &[
        Activity { time: "14:32:05", text: "Started new session with claude-opus-4-6", project: "my-web-app" },
        Activity { time: "14:28:41", text: "Completed task: implement user authentication", project: "api-server" },
        Activity { time: "14:25:12", text: "Created 3 files in components directory", project: "frontend" },
        Activity { time: "14:20:33", text: "Ran 24 tests, all passing", project: "core-lib" },
        Activity { time: "14:15:07", text: "Git commit: fix login redirect loop", project: "my-web-app" },
    ],
    tasks: (5, 2, 1),
    team: "feature-team",
    members: &[
        TeamMember { name: "team-lead", kind: "team-lead", active: true },
        TeamMember { name: "researcher", kind: "general-purpose", active: true },
        TeamMember { name: "implementer", kind: "general-purpose", active: false },
    ],
};

impl DashboardData {
    /// Bar heights of the hourly chart in percent, never below 4%.
    pub fn hourly_heights(&self) -> [f64; 24] {
        let peak = self.hourly.iter().copied().max().unwrap_or(0).max(1) as f64;
        self.hourly.map(|v| (v as f64 / peak * 100.0).max(4.0))
    }
}

fn blurred(el: Element) -> Element {
    el.decls(theme::redacted(BLUR_PX))
}

fn muted_pill(text: impl Into<String>) -> Element {
    Element::span()
        .px("font-size", 10.0)
        .style("padding", "2px 8px")
        .px("border-radius", 8.0)
        .style("background", theme::BLUE.with_alpha(0.1).to_css())
        .style("color", theme::BLUE.to_css())
        .style("font-weight", "400")
        .style("text-transform", "none")
        .style("letter-spacing", "0")
        .text(text)
}

fn header(d: &DashboardData) -> Element {
    let counters = Element::div()
        .style("display", "flex")
        .px("gap", 16.0)
        .style("align-items", "center")
        .children(d.counters.iter().map(|c| {
            Element::div()
                .style("display", "flex")
                .style("align-items", "center")
                .px("gap", 5.0)
                .px("font-size", 11.0)
                .child(Element::span().style("color", theme::T3.to_css()).text(c.label))
                .child(
                    Element::span()
                        .style("color", c.color.to_css())
                        .style("font-weight", "600")
                        .text(c.value),
                )
        }));

    Element::div()
        .style("display", "flex")
        .style("align-items", "center")
        .style("justify-content", "space-between")
        .style("padding", "10px 20px")
        .style("border-bottom", format!("1px solid {}", theme::BORDER.to_css()))
        .style("background", theme::BG2.to_css())
        .styles(DASHBOARD_FONT)
        .child(
            Element::div()
                .px("font-size", 18.0)
                .style("font-weight", "700")
                .decls(theme::brand_gradient_text(135))
                .text("Claude Code Monitor"),
        )
        .child(counters)
        .child(
            Element::div()
                .style("display", "flex")
                .style("align-items", "center")
                .px("gap", 10.0)
                .child(
                    Element::span()
                        .px("font-size", 12.0)
                        .style("color", theme::T3.to_css())
                        .text(d.clock),
                )
                .child(dot(theme::GREEN, Some(6)))
                .child(
                    Element::span()
                        .px("font-size", 11.0)
                        .style("color", theme::T2.to_css())
                        .text("LIVE"),
                ),
        )
}

fn flow_section() -> Element {
    Element::div()
        .style("border-bottom", format!("1px solid {}", theme::BORDER.to_css()))
        .style("background", theme::BG1.to_css())
        .child(
            Element::div()
                .style("display", "flex")
                .style("align-items", "center")
                .style("justify-content", "space-between")
                .style("padding", "10px 20px")
                .styles(DASHBOARD_FONT)
                .child(
                    Element::div()
                        .px("font-size", 13.0)
                        .style("font-weight", "600")
                        .style("color", theme::T2.to_css())
                        .style("text-transform", "uppercase")
                        .px("letter-spacing", 0.5)
                        .style("display", "flex")
                        .style("align-items", "center")
                        .px("gap", 8.0)
                        .child(Element::span().px("font-size", 10.0).text("\u{25B6}"))
                        .text(" Agent Topology & Flow"),
                )
                .child(muted_pill("1 team")),
        )
}

fn filter_bar(d: &DashboardData) -> Element {
    Element::div()
        .style("display", "flex")
        .style("align-items", "center")
        .px("gap", 12.0)
        .style("padding", "10px 20px")
        .style("border-bottom", format!("1px solid {}", theme::BORDER.to_css()))
        .style("background", theme::BG1.to_css())
        .styles(DASHBOARD_FONT)
        .children(d.filters.iter().enumerate().map(|(i, label)| {
            let selected = i == 0;
            Element::button()
                .style("padding", "4px 14px")
                .px("border-radius", 14.0)
                .style(
                    "border",
                    format!(
                        "1px solid {}",
                        if selected { theme::BLUE } else { theme::BORDER }.to_css()
                    ),
                )
                .style(
                    "background",
                    if selected {
                        theme::BLUE.with_alpha(0.15).to_css()
                    } else {
                        "transparent".to_string()
                    },
                )
                .style(
                    "color",
                    if selected { theme::BLUE } else { theme::T2 }.to_css(),
                )
                .px("font-size", 11.0)
                .styles(DASHBOARD_FONT)
                .text(*label)
        }))
        .child(
            Element::span()
                .style("margin-left", "auto")
                .px("font-size", 11.0)
                .style("color", theme::T3.to_css())
                .text(d.visible_projects),
        )
}

fn conversation(turns: &[ConversationTurn]) -> Element {
    Element::div()
        .style("margin", "6px 10px 4px")
        .style("border", format!("1px solid {}", theme::BORDER.to_css()))
        .px("border-radius", 8.0)
        .style("background", theme::BG0.to_css())
        .style("overflow", "hidden")
        .child(
            Element::div()
                .style("display", "flex")
                .style("align-items", "center")
                .style("justify-content", "space-between")
                .style("padding", "5px 10px")
                .style("background", theme::BG3.to_css())
                .px("font-size", 10.0)
                .style("color", theme::T2.to_css())
                .child(Element::span().text(format!("\u{25B6} Conversation ({})", turns.len() * 2))),
        )
        .child(
            Element::div()
                .style("padding", "6px 0")
                .children(turns.iter().map(|t| {
                    Element::div()
                        .style("display", "flex")
                        .px("gap", 6.0)
                        .style("padding", "3px 10px")
                        .px("font-size", 10.0)
                        .num("line-height", 1.4)
                        .child(
                            Element::div()
                                .style("flex-shrink", "0")
                                .px("width", 14.0)
                                .px("height", 14.0)
                                .px("border-radius", 3.0)
                                .style("display", "flex")
                                .style("align-items", "center")
                                .style("justify-content", "center")
                                .px("font-size", 8.0)
                                .style("font-weight", "700")
                                .style("background", t.color.with_alpha(0.2).to_css())
                                .style("color", t.color.to_css())
                                .px("margin-top", 1.0)
                                .text(t.role),
                        )
                        .child(blurred(ellipsis(
                            Element::div()
                                .num("flex", 1.0)
                                .style("color", theme::T2.to_css()),
                        ))
                        .text(t.text))
                })),
        )
}

fn session(row: &SessionRow, turns: &[ConversationTurn]) -> Element {
    let active = row.status == Status::Active;
    let mut title = Element::div()
        .style("display", "flex")
        .style("align-items", "center")
        .px("gap", 8.0)
        .px("margin-bottom", 3.0)
        .child(dot(row.status.color(), active.then_some(6)))
        .child(blurred(
            Element::span()
                .px("font-size", 11.0)
                .style("font-weight", "600")
                .style("color", theme::T2.to_css())
                .text("#a8f3c2d1"),
        ))
        .child(
            Element::span()
                .px("font-size", 10.0)
                .style("color", theme::PURPLE.to_css())
                .text(row.model),
        );
    if let Some(branch) = row.branch {
        title = title.child(
            Element::span()
                .px("font-size", 10.0)
                .style("color", theme::TEAL.to_css())
                .text(branch),
        );
    }
    title = title.child(
        Element::span()
            .style("margin-left", "auto")
            .px("font-size", 10.0)
            .style("color", theme::T3.to_css())
            .text(if active { "now" } else { "4m ago" }),
    );

    let indented = |el: Element| el.style("margin", "2px 0 2px 15px");

    let mut el = Element::div()
        .style("padding", "8px 14px")
        .style("border-bottom", format!("1px solid {}", theme::ROW_RULE.to_css()))
        .style(
            "background",
            if active {
                theme::GREEN.with_alpha(0.04).to_css()
            } else {
                "transparent".to_string()
            },
        )
        .styles(DASHBOARD_FONT)
        .child(title)
        .child(blurred(ellipsis(indented(
            Element::div()
                .px("font-size", 11.0)
                .style("color", theme::T2.to_css()),
        )))
        .text(row.summary))
        .child(blurred(ellipsis(indented(
            Element::div()
                .px("font-size", 11.0)
                .style("color", theme::T1.to_css())
                .num("opacity", 0.8),
        )))
        .text(format!("\"{}\"", row.prompt)))
        .child(
            Element::div()
                .style("display", "flex")
                .px("gap", 12.0)
                .style("margin", "3px 0 0 15px")
                .px("font-size", 10.0)
                .style("color", theme::T3.to_css())
                .child(metric(&row.messages.to_string(), " msgs"))
                .child(metric(row.size, " bytes")),
        );

    if let Some(tool) = row.tool {
        el = el.child(
            Element::div()
                .style("margin", "3px 0 0 15px")
                .px("font-size", 10.0)
                .style("color", theme::ORANGE.to_css())
                .style("display", "flex")
                .style("align-items", "center")
                .px("gap", 4.0)
                .text("\u{25B6} ")
                .child(blurred(Element::span()).text(tool)),
        );
    }
    if let Some((tok_in, tok_out)) = row.tokens {
        el = el.child(
            Element::div()
                .style("display", "flex")
                .px("gap", 10.0)
                .style("margin", "2px 0 0 15px")
                .px("font-size", 9.0)
                .style("color", theme::T3.to_css())
                .child(Element::span().text(format!("in:{}", tok_in)))
                .child(Element::span().text(format!("out:{}", tok_out))),
        );
    }
    if row.show_conversation {
        el = el.child(conversation(turns));
    }
    el
}

fn metric(value: &str, unit: &str) -> Element {
    Element::span()
        .child(
            Element::span()
                .style("color", theme::T2.to_css())
                .style("font-weight", "500")
                .text(value),
        )
        .text(unit)
}

fn idle_note(count: u32) -> Element {
    Element::div()
        .style("padding", "8px 14px")
        .px("font-size", 11.0)
        .style("color", theme::T3.to_css())
        .style("display", "flex")
        .style("align-items", "center")
        .px("gap", 6.0)
        .child(Element::span().px("font-size", 8.0).text("\u{25B6}"))
        .text(format!(" {} idle sessions", count))
}

fn project_card(card: &ProjectCard, turns: &[ConversationTurn]) -> Element {
    let active = card.status == Status::Active;
    let border = match card.status {
        Status::Idle => theme::BORDER,
        other => other.color(),
    };

    let mut badges = Element::div().style("display", "flex").px("gap", 6.0);
    if let Some(n) = card.active {
        badges = badges.child(badge(
            format!("{} active", n),
            theme::GREEN.with_alpha(0.15),
            theme::GREEN,
        ));
    }
    if let Some(n) = card.recent {
        badges = badges.child(badge(
            format!("{} recent", n),
            theme::BLUE.with_alpha(0.1),
            theme::BLUE,
        ));
    }
    badges = badges.child(badge(
        format!("{} total", card.total),
        theme::BLUE.with_alpha(0.1),
        theme::BLUE,
    ));

    let head = Element::div()
        .style("display", "flex")
        .style("align-items", "center")
        .style("justify-content", "space-between")
        .style("padding", "10px 14px")
        .style("border-bottom", format!("1px solid {}", theme::BORDER.to_css()))
        .style("background", theme::BG3.to_css())
        .child(
            Element::div()
                .px("font-size", 13.0)
                .style("font-weight", "600")
                .style("color", theme::T1.to_css())
                .style("display", "flex")
                .style("align-items", "center")
                .px("gap", 6.0)
                .child(dot(card.status.color(), active.then_some(6)))
                .child(blurred(Element::span()).text(card.name)),
        )
        .child(badges);

    let path = blurred(ellipsis(
        Element::div()
            .style("padding", "4px 14px 4px")
            .px("font-size", 10.0)
            .style("color", theme::T3.to_css())
            .style("border-bottom", format!("1px solid {}", theme::BORDER.with_alpha(0.5).to_css())),
    ))
    .text(card.path);

    let mut body = Element::div().px("max-height", 500.0).style("overflow", "hidden");
    for row in card.sessions {
        body = body.child(session(row, turns));
    }
    if let Some(n) = card.idle_sessions {
        body = body.child(idle_note(n));
    }

    Element::div()
        .style("background", theme::BG2.to_css())
        .style("border", format!("1px solid {}", border.to_css()))
        .px("border-radius", 10.0)
        .style("overflow", "hidden")
        .style(
            "box-shadow",
            if active {
                format!("0 0 20px {}", theme::GREEN.with_alpha(0.1).to_css())
            } else {
                "none".to_string()
            },
        )
        .styles(DASHBOARD_FONT)
        .child(head)
        .child(path)
        .child(body)
}

/// Bordered panel with an uppercase title and a pill in the header.
fn panel(title: &str, pill: &str, body: Element) -> Element {
    Element::div()
        .style("background", theme::BG2.to_css())
        .style("border", format!("1px solid {}", theme::BORDER.to_css()))
        .px("border-radius", 10.0)
        .style("overflow", "hidden")
        .styles(DASHBOARD_FONT)
        .child(
            Element::div()
                .style("display", "flex")
                .style("align-items", "center")
                .style("justify-content", "space-between")
                .style("padding", "10px 14px")
                .style("border-bottom", format!("1px solid {}", theme::BORDER.to_css()))
                .style("background", theme::BG3.to_css())
                .px("font-size", 12.0)
                .style("font-weight", "600")
                .style("color", theme::T2.to_css())
                .style("text-transform", "uppercase")
                .px("letter-spacing", 0.5)
                .text(format!("{} ", title))
                .child(muted_pill(pill)),
        )
        .child(body)
}

fn stats_panel(d: &DashboardData) -> Element {
    let mut body = Element::div().style("padding", "12px 14px").px("font-size", 11.0);
    for row in d.stats {
        body = body.child(
            Element::div()
                .style("display", "flex")
                .style("justify-content", "space-between")
                .style("padding", "4px 0")
                .style("border-bottom", format!("1px solid {}", theme::ROW_RULE.to_css()))
                .child(Element::span().style("color", theme::T3.to_css()).text(row.label))
                .child(
                    Element::span()
                        .style("color", row.color.unwrap_or(theme::T1).to_css())
                        .style("font-weight", "500")
                        .text(row.value),
                ),
        );
    }
    for m in d.models {
        body = body.child(
            Element::div()
                .px("margin-top", 8.0)
                .child(
                    Element::div()
                        .style("display", "flex")
                        .style("justify-content", "space-between")
                        .px("font-size", 10.0)
                        .px("margin-bottom", 3.0)
                        .child(Element::span().style("color", theme::T2.to_css()).text(m.name))
                        .child(Element::span().style("color", theme::T3.to_css()).text(m.value)),
                )
                .child(
                    Element::div()
                        .px("height", 5.0)
                        .px("border-radius", 3.0)
                        .style("background", theme::BG0.to_css())
                        .style("overflow", "hidden")
                        .child(
                            Element::div()
                                .style("height", "100%")
                                .style("width", pct(m.percent))
                                .px("border-radius", 3.0)
                                .style(
                                    "background",
                                    format!(
                                        "linear-gradient(90deg, {}, {})",
                                        m.gradient.0.to_css(),
                                        m.gradient.1.to_css()
                                    ),
                                ),
                        ),
                ),
        );
    }
    body = body
        .child(
            Element::div()
                .px("margin-top", 12.0)
                .px("font-size", 10.0)
                .style("color", theme::T3.to_css())
                .style("text-transform", "uppercase")
                .px("letter-spacing", 0.5)
                .px("margin-bottom", 4.0)
                .text("Hourly"),
        )
        .child(
            Element::div()
                .style("display", "flex")
                .style("align-items", "flex-end")
                .px("gap", 1.0)
                .px("height", 40.0)
                .children(d.hourly_heights().iter().map(|h| {
                    Element::div()
                        .num("flex", 1.0)
                        .style("background", theme::BLUE.to_css())
                        .num("opacity", 0.5)
                        .style("border-radius", "1px 1px 0 0")
                        .style("height", pct(*h))
                        .px("min-width", 2.0)
                })),
        );
    panel("Stats", "2.1K msgs", body)
}

fn activity_panel(d: &DashboardData) -> Element {
    let body = Element::div()
        .style("padding", "12px 14px")
        .children(d.activity.iter().map(|a| {
            Element::div()
                .style("display", "flex")
                .px("gap", 8.0)
                .style("padding", "5px 0")
                .style("border-bottom", format!("1px solid {}", theme::ROW_RULE.to_css()))
                .px("font-size", 10.0)
                .child(
                    Element::span()
                        .style("color", theme::T3.to_css())
                        .px("min-width", 55.0)
                        .text(a.time),
                )
                .child(
                    Element::div()
                        .child(
                            blurred(
                                Element::div()
                                    .style("color", theme::T2.to_css())
                                    .num("line-height", 1.3),
                            )
                            .text(a.text),
                        )
                        .child(
                            blurred(
                                Element::div()
                                    .style("color", theme::BLUE.to_css())
                                    .num("opacity", 0.7)
                                    .px("font-size", 9.0),
                            )
                            .text(a.project),
                        ),
                )
        }));
    panel("Activity", "15", body)
}

fn teams_panel(d: &DashboardData) -> Element {
    let (done, in_progress, pending) = d.tasks;
    let tasks = Element::div()
        .px("margin-bottom", 10.0)
        .child(
            Element::div()
                .style("color", theme::T3.to_css())
                .style("text-transform", "uppercase")
                .px("letter-spacing", 0.5)
                .px("margin-bottom", 6.0)
                .px("font-size", 11.0)
                .text("Tasks"),
        )
        .child(
            Element::div()
                .style("display", "flex")
                .px("gap", 12.0)
                .child(Element::span().style("color", theme::GREEN.to_css()).text(format!("{} done", done)))
                .child(
                    Element::span()
                        .style("color", theme::ORANGE.to_css())
                        .text(format!("{} in progress", in_progress)),
                )
                .child(Element::span().style("color", theme::T2.to_css()).text(format!("{} pending", pending))),
        );

    let members = Element::div()
        .child(
            blurred(
                Element::div()
                    .style("color", theme::BLUE.to_css())
                    .px("margin-bottom", 4.0)
                    .px("font-size", 11.0),
            )
            .text(d.team),
        )
        .children(d.members.iter().map(|m| {
            Element::div()
                .style("display", "flex")
                .style("align-items", "center")
                .px("gap", 6.0)
                .style("padding", "3px 0")
                .child(dot(if m.active { theme::GREEN } else { theme::T3 }, None))
                .child(
                    Element::span()
                        .style("color", theme::T1.to_css())
                        .style("font-weight", "500")
                        .text(m.name),
                )
                .child(
                    Element::span()
                        .style("color", theme::T3.to_css())
                        .px("font-size", 10.0)
                        .text(m.kind),
                )
        }));

    panel(
        "Teams & Tasks",
        "1 team",
        Element::div()
            .style("padding", "12px 14px")
            .px("font-size", 11.0)
            .child(tasks)
            .child(members),
    )
}

/// The full 1920x1080 desktop dashboard.
pub fn mock_dashboard() -> Element {
    render(&DASHBOARD)
}

fn render(d: &DashboardData) -> Element {
    let grid = Element::div()
        .style("display", "grid")
        .style("grid-template-columns", "1fr 1fr")
        .px("gap", 14.0)
        .style("align-items", "start")
        .children(d.projects.iter().map(|p| project_card(p, d.conversation)));

    Element::div()
        .px("width", 1920.0)
        .px("height", 1080.0)
        .style("background", theme::BG0.to_css())
        .style("overflow", "hidden")
        .styles(DASHBOARD_FONT)
        .child(header(d))
        .child(flow_section())
        .child(filter_bar(d))
        .child(Element::div().style("padding", "16px 20px").child(grid))
        .child(
            Element::div()
                .style("display", "grid")
                .style("grid-template-columns", "1fr 1fr 1fr")
                .px("gap", 14.0)
                .style("padding", "0 20px 20px")
                .child(stats_panel(d))
                .child(activity_panel(d))
                .child(teams_panel(d)),
        )
}
