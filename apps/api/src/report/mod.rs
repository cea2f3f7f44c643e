//! PDF export of a narrative analysis.
//!
//! A4 pages with 36pt margins: a title, the score line, then eight headed bulleted
//! sections. Lines are measured with static Helvetica metrics and word-wrapped; content
//! that does not fit flows onto a new page.

pub mod handlers;
pub mod metrics;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use crate::analysis::AnalysisReport;
use crate::report::metrics::ReportFont;

pub const REPORT_FILE_NAME: &str = "Resume_Analysis_Report.pdf";
pub const REPORT_TITLE: &str = "Resume Analysis Report";

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 36.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 14.0;
const BULLET_INDENT: f32 = 14.0;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Section headings in report order, paired with the list each one renders.
pub fn report_sections(report: &AnalysisReport) -> [(&'static str, &[String]); 8] {
    [
        ("Strengths", &report.strengths),
        ("Weaknesses", &report.weaknesses),
        ("Missing / Suggested Skills", &report.missing_skills),
        ("Improved Resume Bullet Points", &report.improved_bullets),
        ("Overall Suggestions", &report.suggestions),
        ("Skill Improvement Roadmap", &report.skill_roadmap),
        ("Project Feedback", &report.project_feedback),
        ("Recommended Projects to Add", &report.recommended_projects),
    ]
}

pub fn render_report_pdf(report: &AnalysisReport) -> Result<Vec<u8>, ReportError> {
    let mut pages = PageFlow::new();

    pages.gap(TITLE_SIZE);
    pages.text_line(REPORT_TITLE, ReportFont::HelveticaBold, TITLE_SIZE, 0.0);
    pages.gap(12.0);
    pages.text_line(
        &format!("ATS Compatibility Score: {} / 100", report.ats_score),
        ReportFont::HelveticaBold,
        11.0,
        0.0,
    );
    pages.gap(10.0);

    let body_width = PAGE_WIDTH - 2.0 * MARGIN - BULLET_INDENT;
    for (heading, items) in report_sections(report) {
        pages.gap(6.0);
        pages.text_line(heading, ReportFont::HelveticaBold, HEADING_SIZE, 0.0);
        pages.gap(3.0);
        for item in items {
            let lines = ReportFont::Helvetica.metrics().wrap(item, BODY_SIZE, body_width);
            for (i, line) in lines.iter().enumerate() {
                if i == 0 {
                    pages.bullet(line);
                } else {
                    pages.text_line(line, ReportFont::Helvetica, BODY_SIZE, BULLET_INDENT);
                }
            }
        }
        pages.gap(8.0);
    }

    write_document(pages.finish())
}

// ────────────────────────────────────────────────────────────────────────────
// Page flow
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates text operations top-down, starting a new page when the cursor
/// would cross the bottom margin.
struct PageFlow {
    pages: Vec<Vec<Operation>>,
    cursor_y: f32,
}

impl PageFlow {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn gap(&mut self, points: f32) {
        self.cursor_y -= points;
    }

    fn advance(&mut self, leading: f32) -> f32 {
        if self.cursor_y - leading < MARGIN {
            self.pages.push(Vec::new());
            self.cursor_y = PAGE_HEIGHT - MARGIN;
        }
        self.cursor_y -= leading;
        self.cursor_y
    }

    fn text_line(&mut self, text: &str, font: ReportFont, size: f32, indent: f32) {
        let leading = size.max(BODY_SIZE) + 4.0;
        let y = self.advance(leading);
        self.push_text(text, font, size, MARGIN + indent, y);
    }

    fn bullet(&mut self, text: &str) {
        let y = self.advance(BODY_LEADING);
        self.push_text("\u{2022}", ReportFont::Helvetica, BODY_SIZE, MARGIN + 4.0, y);
        self.push_text(text, ReportFont::Helvetica, BODY_SIZE, MARGIN + BULLET_INDENT, y);
    }

    fn push_text(&mut self, text: &str, font: ReportFont, size: f32, x: f32, y: f32) {
        let ops = [
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            ),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ];
        if let Some(page) = self.pages.last_mut() {
            page.extend(ops);
        }
    }

    fn finish(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}

/// Encodes `text` for a WinAnsiEncoding standard font. Typographic punctuation maps
/// to its WinAnsi slot; characters outside the encoding become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{2022}' => 0x95,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            '\u{20AC}' => 0x80,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

fn write_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_ids: Vec<(ReportFont, ObjectId)> = [ReportFont::Helvetica, ReportFont::HelveticaBold]
        .into_iter()
        .map(|font| {
            let id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            (font, id)
        })
        .collect();

    let mut font_dict = lopdf::Dictionary::new();
    for (font, id) in &font_ids {
        font_dict.set(font.resource_name(), Object::Reference(*id));
    }
    let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}
