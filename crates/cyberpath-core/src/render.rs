use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthStr;

use crate::catalog::{self, PathEntry};
use crate::config::Config;
use crate::datetime::humanize_age;
use crate::messages;
use crate::ops::{Notice, NoticeKind};
use crate::prefs::{Language, Theme};
use crate::task::{Category, Task};

/// Single seam between state and terminal output. Every view is rendered
/// into a writer, so the state logic stays testable without a terminal.
#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    theme: Theme,
}

enum Role {
    Id,
    Done,
    Heading,
    Success,
    Info,
    Error,
}

impl Renderer {
    pub fn from_config(cfg: &Config, theme: Theme) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => io::stdout().is_terminal(),
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color, theme })
    }

    /// Colorless renderer, used by tests.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            color: false,
            theme: Theme::Light,
        }
    }

    /// The theme toggle swaps the palette of everything printed afterwards.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    #[tracing::instrument(skip(self, tasks, now))]
    pub fn print_task_table(
        &self,
        tasks: &[Task],
        language: Language,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.render_task_table(&mut out, tasks, language, now)
    }

    pub fn render_task_table<W: Write>(
        &self,
        writer: &mut W,
        tasks: &[Task],
        language: Language,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let headers = messages::table_headers(language)
            .map(str::to_string)
            .to_vec();

        let mut rows = Vec::with_capacity(tasks.len());
        for task in tasks {
            let marker = if task.completed {
                self.paint("[x]", Role::Done)
            } else {
                "[ ]".to_string()
            };
            rows.push(vec![
                self.paint(&task.id.to_string(), Role::Id),
                marker,
                catalog::category_label(task.category, language).to_string(),
                humanize_age(task.created_at, now, language),
                task.text.clone(),
            ]);
        }

        write_table(writer, headers, rows, language.is_rtl())
    }

    pub fn print_empty_state(&self, language: Language) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(
            out,
            "{}",
            self.paint(messages::empty_list(language), Role::Info)
        )?;
        Ok(())
    }

    pub fn print_notice(&self, notice: &Notice) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let role = match notice.kind {
            NoticeKind::Success => Role::Success,
            NoticeKind::Info => Role::Info,
            NoticeKind::Error => Role::Error,
        };
        writeln!(out, "{}", self.paint(&notice.text, role))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn print_path_details(
        &self,
        category: Category,
        language: Language,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        match catalog::entry(category) {
            Some(localized) => {
                self.render_path_details(&mut out, localized.for_language(language), language)
            }
            None => {
                writeln!(
                    out,
                    "{}",
                    self.paint(
                        &messages::path_not_found(language, category.key()),
                        Role::Info
                    )
                )?;
                Ok(())
            }
        }
    }

    pub fn render_path_details<W: Write>(
        &self,
        writer: &mut W,
        entry: &PathEntry,
        language: Language,
    ) -> anyhow::Result<()> {
        writeln!(writer, "{}", self.paint(&entry.title, Role::Heading))?;
        writeln!(writer, "{}", entry.overview)?;

        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.paint(messages::heading_skills(language), Role::Heading)
        )?;
        for skill in &entry.skills {
            writeln!(
                writer,
                "  - {} [{}]",
                skill.name,
                skill.level.label(language)
            )?;
        }

        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.paint(messages::heading_certifications(language), Role::Heading)
        )?;
        for cert in &entry.certifications {
            writeln!(writer, "  - {cert}")?;
        }

        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.paint(messages::heading_tools(language), Role::Heading)
        )?;
        for tool in &entry.tools {
            writeln!(writer, "  - {tool}")?;
        }

        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.paint(messages::heading_learning_path(language), Role::Heading)
        )?;
        for (idx, step) in entry.learning_path.iter().enumerate() {
            writeln!(writer, "  {}. {step}", idx + 1)?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn print_paths_overview(&self, language: Language) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.render_paths_overview(&mut out, language)
    }

    pub fn render_paths_overview<W: Write>(
        &self,
        writer: &mut W,
        language: Language,
    ) -> anyhow::Result<()> {
        writeln!(
            writer,
            "{}",
            self.paint(messages::heading_paths(language), Role::Heading)
        )?;

        let headers = vec![String::new(), String::new()];
        let mut rows = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let title = catalog::entry(category)
                .map(|localized| localized.for_language(language).title.as_str())
                .unwrap_or_else(|| category.key());
            rows.push(vec![
                self.paint(category.key(), Role::Id),
                title.to_string(),
            ]);
        }

        write_table(writer, headers, rows, language.is_rtl())
    }

    fn paint(&self, text: &str, role: Role) -> String {
        if !self.color {
            return text.to_string();
        }
        let code = match (&role, self.theme) {
            (Role::Id, Theme::Light) => "33",
            (Role::Id, Theme::Dark) => "93",
            (Role::Done, Theme::Light) => "32",
            (Role::Done, Theme::Dark) => "92",
            (Role::Success, Theme::Light) => "32",
            (Role::Success, Theme::Dark) => "92",
            (Role::Info, Theme::Light) => "36",
            (Role::Info, Theme::Dark) => "96",
            (Role::Error, Theme::Light) => "31",
            (Role::Error, Theme::Dark) => "91",
            (Role::Heading, _) => "1",
        };
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

/// Right-to-left languages get right-aligned cells; padding flips sides.
fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    right_align: bool,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    if headers.iter().any(|header| !header.is_empty()) {
        for (idx, header) in headers.iter().enumerate() {
            write_cell(&mut writer, header, widths[idx], right_align)?;
        }
        writeln!(writer)?;

        for idx in 0..column_count {
            write!(writer, "{:-<width$} ", "", width = widths[idx])?;
        }
        writeln!(writer)?;
    }

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            write_cell(&mut writer, cell, widths[idx], right_align)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn write_cell<W: Write>(
    writer: &mut W,
    cell: &str,
    width: usize,
    right_align: bool,
) -> anyhow::Result<()> {
    let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
    let padding = width.saturating_sub(visible_width);
    if right_align {
        write!(writer, "{}{} ", " ".repeat(padding), cell)?;
    } else {
        write!(writer, "{}{} ", cell, " ".repeat(padding))?;
    }
    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::Renderer;
    use crate::prefs::Language;
    use crate::task::{Category, Task};

    fn rendered(tasks: &[Task], language: Language) -> String {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
            .single()
            .expect("valid now");
        let mut buffer = Vec::new();
        Renderer::plain()
            .render_task_table(&mut buffer, tasks, language, now)
            .expect("render");
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn table_shows_localized_headers_and_labels() {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
            .single()
            .expect("valid now");
        let tasks = vec![Task::new(
            "Learn TCP handshake".to_string(),
            Category::Pentest,
            now,
            1,
        )];

        let english = rendered(&tasks, Language::En);
        assert!(english.contains("Category"));
        assert!(english.contains("Penetration Testing"));
        assert!(english.contains("Today"));
        assert!(english.contains("[ ]"));

        let arabic = rendered(&tasks, Language::Ar);
        assert!(arabic.contains("الفئة"));
        assert!(arabic.contains("اختبار الاختراق"));
        assert!(arabic.contains("اليوم"));
    }

    #[test]
    fn path_details_include_all_sections() {
        let entry = crate::catalog::entry(Category::Malware).expect("malware entry");
        let mut buffer = Vec::new();
        Renderer::plain()
            .render_path_details(&mut buffer, &entry.en, Language::En)
            .expect("render");
        let text = String::from_utf8(buffer).expect("utf8 output");

        assert!(text.contains("Malware Analysis Career Path"));
        assert!(text.contains("Required Skills"));
        assert!(text.contains("Recommended Certifications"));
        assert!(text.contains("Essential Tools"));
        assert!(text.contains("Learning Path"));
        assert!(text.contains("[intermediate]"));
        assert!(text.contains("1. "));
    }

    #[test]
    fn overview_lists_every_category_key() {
        let mut buffer = Vec::new();
        Renderer::plain()
            .render_paths_overview(&mut buffer, Language::En)
            .expect("render");
        let text = String::from_utf8(buffer).expect("utf8 output");
        for category in Category::ALL {
            assert!(text.contains(category.key()));
        }
    }
}
