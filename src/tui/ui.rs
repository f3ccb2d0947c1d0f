use ratatui::prelude::*;
use ratatui::widgets::{BarChart, Block, Clear, Paragraph, Wrap};

use crate::output::{format_measure, format_score};
use crate::tui::app::{App, InputMode, Panel};

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 20 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Weather row(10) + Calculators(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(10),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);

    let top = Layout::horizontal([
        Constraint::Length(24),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(chunks[1]);
    render_weather_stats(frame, top[0], app);
    render_rain_chart(frame, top[1], app);
    render_air_chart(frame, top[2], app);

    let bottom =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).split(chunks[2]);
    render_quiz(frame, bottom[0], app);

    let side = Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).split(bottom[1]);
    render_carbon(frame, side[0], app);
    render_plants(frame, side[1], app);

    render_status_bar(frame, chunks[3], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }

    // Loading overlay goes on top of everything
    if app.is_loading {
        render_loading_overlay(frame, app);
    }
}

fn panel<'a>(title: &'a str, focused: bool, app: &App) -> Block<'a> {
    let border = if focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };
    Block::bordered()
        .title(Span::styled(format!(" {} ", title), app.theme.title_style))
        .border_style(Style::default().fg(border))
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let name = "Eco Dash";
    let location = app.location.display_line();
    let padding_len = (area.width as usize).saturating_sub(name.len() + location.chars().count());

    let title = Line::from(vec![
        Span::styled(name, Style::default().fg(app.theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(location, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_weather_stats(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel("Now", false, app);
    let muted = Style::default().fg(app.theme.muted);

    let value = |v: Option<String>| match v {
        Some(s) => Span::styled(s, Style::default().fg(app.theme.highlight).bold()),
        None => Span::styled("--", muted),
    };

    let weather = app.data.weather.as_ref();
    let air = app.data.air_quality.as_ref();
    let lines = vec![
        Line::from(vec![
            Span::styled("Temp      ", muted),
            value(weather.map(|w| format!("{}°C", w.temperature_c))),
        ]),
        Line::from(vec![
            Span::styled("Wind      ", muted),
            value(weather.map(|w| format!("{} km/h", w.wind_kmh))),
        ]),
        Line::from(vec![
            Span::styled("Humidity  ", muted),
            value(Some(format!("{}%", app.config.weather.humidity_placeholder))),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("PM2.5     ", muted),
            value(air.map(|a| format_measure(a.pm2_5, "µg/m³"))),
        ]),
        Line::from(vec![
            Span::styled("NO2       ", muted),
            value(air.map(|a| format_measure(a.no2, "µg/m³"))),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_rain_chart(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel("Rain Probability (%)", false, app);

    let Some(weather) = app.data.weather.as_ref() else {
        render_unavailable(frame, area, block, app);
        return;
    };

    let bars: Vec<(&str, u64)> = weather
        .rain
        .iter()
        .map(|p| (p.label.as_str(), p.probability.unwrap_or(0.0).round().max(0.0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(&bars[..])
        .max(100)
        .bar_width(4)
        .bar_gap(1)
        .bar_style(Style::default().fg(app.theme.rain_bar))
        .value_style(Style::default().fg(app.theme.bar_value).bg(app.theme.rain_bar))
        .label_style(Style::default().fg(app.theme.muted));
    frame.render_widget(chart, area);
}

fn render_air_chart(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel("Air Quality (µg/m³)", false, app);

    let Some(air) = app.data.air_quality.as_ref() else {
        render_unavailable(frame, area, block, app);
        return;
    };

    let bars: Vec<(&str, u64)> = air
        .series()
        .iter()
        .map(|(label, v)| (*label, v.unwrap_or(0.0).round().max(0.0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(&bars[..])
        .bar_width(6)
        .bar_gap(1)
        .bar_style(Style::default().fg(app.theme.air_bar))
        .value_style(Style::default().fg(app.theme.bar_value).bg(app.theme.air_bar))
        .label_style(Style::default().fg(app.theme.muted));
    frame.render_widget(chart, area);
}

fn render_unavailable(frame: &mut Frame, area: Rect, block: Block, app: &App) {
    let text = if app.is_loading { "" } else { "No data" };
    let msg = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.muted))
        .block(block);
    frame.render_widget(msg, area);
}

fn render_quiz(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Panel::Quiz;
    let block = panel("Pollution Footprint", focused, app);
    let theme = &app.theme;
    let selections = app.quiz.selections();

    let mut lines = Vec::new();
    for (g, group) in app.config.quiz.groups.iter().enumerate() {
        let on_group = focused && g == app.quiz_group;
        let prompt_style = if on_group {
            Style::default().fg(theme.highlight).bold()
        } else {
            Style::default().fg(theme.muted)
        };
        lines.push(Line::from(Span::styled(
            format!("{}. {}", g + 1, group.prompt),
            prompt_style,
        )));

        let mut spans = vec![Span::raw("   ")];
        for (o, option) in group.options.iter().enumerate() {
            let chosen = app
                .config
                .quiz
                .option_ref(g, o)
                .is_some_and(|r| selections.is_selected(r));
            let marker = if chosen { "●" } else { "○" };
            let mut style = if chosen {
                Style::default().fg(theme.option_selected)
            } else {
                Style::default()
            };
            if on_group && o == app.quiz_option {
                style = style.patch(theme.option_cursor);
            }
            spans.push(Span::styled(format!("{} {}", marker, option.label), style));
            spans.push(Span::raw("  "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    match &app.footprint {
        Some(result) => {
            let color = theme.tier_color(result.tier);
            lines.push(Line::from(vec![
                Span::raw("Impact score: "),
                Span::styled(
                    format_score(result.total_score, app.config.quiz.max_score),
                    Style::default().bold(),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                result.tier.message(),
                Style::default().fg(color).bold(),
            )));
            lines.extend(
                result
                    .tips
                    .iter()
                    .map(|tip| Line::from(format!("  • {}", tip))),
            );
        }
        None => {
            let answered = selections.len();
            let total = app.config.quiz.required_group_count();
            lines.push(Line::from(Span::styled(
                format!("{}/{} answered, press c to calculate", answered, total),
                Style::default().fg(theme.muted),
            )));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_carbon(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel("Carbon Sequestration", app.focus == Panel::Carbon, app);
    let muted = Style::default().fg(app.theme.muted);

    let lines = vec![
        Line::from(vec![
            Span::styled("Trees  ", muted),
            Span::raw(app.carbon.trees.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Soil   ", muted),
            Span::raw(format!("{} m²", app.carbon.soil_m2)),
        ]),
        Line::from(vec![
            Span::styled("Total  ", muted),
            Span::styled(
                app.carbon.estimate().to_string(),
                Style::default().fg(app.theme.tier_eco).bold(),
            ),
            Span::styled(" t CO₂/yr", muted),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_plants(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel("Air-Purifying Plants", app.focus == Panel::Plants, app);
    let muted = Style::default().fg(app.theme.muted);
    let stats = app.plant.stats();

    let lines = vec![
        Line::from(Span::styled(
            format!("◀ {} ▶", app.plant.name()),
            Style::default().fg(app.theme.tier_eco).bold(),
        )),
        Line::from(vec![
            Span::styled("CO₂     ", muted),
            Span::raw(stats.co2_absorption),
        ]),
        Line::from(vec![
            Span::styled("Oxygen  ", muted),
            Span::raw(stats.oxygen_output),
        ]),
        Line::from(vec![
            Span::styled("Best in ", muted),
            Span::raw(stats.best_room),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Refresh failed") || msg.starts_with("Please") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let refresh_time = match app.last_refresh {
            Some(t) if t.elapsed().as_secs() < 60 => {
                format!("refreshed {}s ago", t.elapsed().as_secs())
            }
            Some(t) => format!("refreshed {}m ago", t.elapsed().as_secs() / 60),
            None => "not refreshed yet".to_string(),
        };

        let hints: &[(&str, &str)] = match app.focus {
            Panel::Quiz => &[
                ("↑↓", ":question "),
                ("←→", ":answer "),
                ("Space", ":pick "),
                ("c", ":calculate "),
                ("x", ":reset "),
            ],
            Panel::Carbon => &[("↑↓", ":trees "), ("←→", ":soil ")],
            Panel::Plants => &[("←→", ":plant ")],
        };

        let mut spans = vec![
            Span::styled(refresh_time, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (key, label) in hints
            .iter()
            .chain([("Tab", ":panel "), ("r", ":refresh "), ("?", ":help "), ("q", ":quit")].iter())
        {
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(52, 17, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(app.theme.popup_border))
        .style(Style::default().bg(app.theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(app.theme.status_key_color).bold());
    let help_lines = vec![
        Line::from(vec![key("Tab           "), Span::raw("Next panel")]),
        Line::from(vec![key("r             "), Span::raw("Refresh weather and air quality")]),
        Line::from(vec![key("q / Ctrl-c    "), Span::raw("Quit")]),
        Line::from(""),
        Line::from(vec![key("Quiz")]),
        Line::from(vec![key("  ↑↓ / j k    "), Span::raw("Previous / next question")]),
        Line::from(vec![key("  ←→ / h l    "), Span::raw("Move between answers")]),
        Line::from(vec![key("  Space/Enter "), Span::raw("Pick answer (or 1-9)")]),
        Line::from(vec![key("  c / x       "), Span::raw("Calculate / reset")]),
        Line::from(""),
        Line::from(vec![key("Carbon  "), Span::raw("↑↓ trees ±1, ←→ soil ±50 m²")]),
        Line::from(vec![key("Plants  "), Span::raw("←→ cycle plants")]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(app.theme.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}

fn render_loading_overlay(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(34, 3, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().border_style(Style::default().fg(app.theme.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // Braille spinner animation
    let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner = spinner_chars[app.spinner_frame % spinner_chars.len()];

    let text = if app.last_refresh.is_none() {
        format!("{} Loading weather...", spinner)
    } else {
        format!("{} Refreshing...", spinner)
    };

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.title_color)),
        inner,
    );
}
