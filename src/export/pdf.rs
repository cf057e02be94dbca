//! Lays out the ledger report and writes it as a PDF document.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::{
    Error,
    html::{format_amount, truncate_graphemes},
    transaction::{LedgerReport, Transaction},
};

/// Converts a [LedgerReport] into the bytes of a PDF document.
pub trait PdfRenderer {
    /// Render `report` as a PDF document.
    ///
    /// # Errors
    /// Implementers should return [Error::RenderError] if the document could not be produced.
    fn render(&self, report: &LedgerReport) -> Result<Vec<u8>, Error>;
}

/// Renders the ledger as an A4 document using the PDF built-in Helvetica fonts.
///
/// The built-in fonts only cover the Windows-1252 character set, so other
/// characters in categories may not display correctly.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintPdfRenderer;

impl PdfRenderer for PrintPdfRenderer {
    fn render(&self, report: &LedgerReport) -> Result<Vec<u8>, Error> {
        let pages = layout_report(report);

        let (document, first_page, first_layer) =
            PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

        let regular = document
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|error| Error::RenderError(error.to_string()))?;
        let bold = document
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|error| Error::RenderError(error.to_string()))?;

        for (page_number, lines) in pages.iter().enumerate() {
            let layer = if page_number == 0 {
                document.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = document.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                document.get_page(page).get_layer(layer)
            };

            for line in lines {
                let font: &IndirectFontRef = if line.bold { &bold } else { &regular };
                layer.use_text(line.text.clone(), line.size, Mm(line.x), Mm(line.y), font);
            }
        }

        document
            .save_to_bytes()
            .map_err(|error| Error::RenderError(error.to_string()))
    }
}

const TITLE: &str = "Kakeibo";

// A4 in millimetres.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;

const MARGIN: f32 = 15.0;
const TOP: f32 = PAGE_HEIGHT - 20.0;
const ROW_HEIGHT: f32 = 7.0;
/// Rows stop above this height to leave room for the page number.
const BOTTOM: f32 = 25.0;

const TITLE_SIZE: f32 = 18.0;
const TEXT_SIZE: f32 = 11.0;
const FOOTER_SIZE: f32 = 9.0;

const DATE_X: f32 = MARGIN;
const TYPE_X: f32 = 50.0;
const CATEGORY_X: f32 = 80.0;
const AMOUNT_X: f32 = 160.0;

const MAX_CATEGORY_GRAPHEMES: usize = 40;

/// A single run of text placed on a page, with positions in millimetres from
/// the bottom left corner.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
}

impl TextLine {
    fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size: TEXT_SIZE,
            bold: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// Place the title, totals and transaction table onto as many pages as needed.
///
/// The first page starts with the title and totals. Every page repeats the
/// table header and ends with its page number.
pub(crate) fn layout_report(report: &LedgerReport) -> Vec<Vec<TextLine>> {
    let mut pages = Vec::new();
    let mut page = vec![
        TextLine::new(TITLE, MARGIN, TOP).size(TITLE_SIZE).bold(),
        TextLine::new(
            format!("Income: {}", format_amount(report.totals.income)),
            MARGIN,
            TOP - 12.0,
        ),
        TextLine::new(
            format!("Expense: {}", format_amount(report.totals.expense)),
            MARGIN,
            TOP - 12.0 - ROW_HEIGHT,
        ),
        TextLine::new(
            format!("Balance: {}", format_amount(report.totals.balance())),
            MARGIN,
            TOP - 12.0 - 2.0 * ROW_HEIGHT,
        )
        .bold(),
    ];
    let mut y = TOP - 12.0 - 4.0 * ROW_HEIGHT;
    page.extend(table_header(y));
    y -= ROW_HEIGHT;

    if report.transactions.is_empty() {
        page.push(TextLine::new("No transactions.", MARGIN, y));
    }

    for transaction in &report.transactions {
        if y < BOTTOM {
            pages.push(std::mem::take(&mut page));
            y = TOP;
            page.extend(table_header(y));
            y -= ROW_HEIGHT;
        }

        page.extend(transaction_row(transaction, y));
        y -= ROW_HEIGHT;
    }

    pages.push(page);

    let page_count = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        page.push(
            TextLine::new(
                format!("Page {} of {page_count}", index + 1),
                MARGIN,
                MARGIN,
            )
            .size(FOOTER_SIZE),
        );
    }

    pages
}

fn table_header(y: f32) -> [TextLine; 4] {
    [
        TextLine::new("Date", DATE_X, y).bold(),
        TextLine::new("Type", TYPE_X, y).bold(),
        TextLine::new("Category", CATEGORY_X, y).bold(),
        TextLine::new("Amount", AMOUNT_X, y).bold(),
    ]
}

fn transaction_row(transaction: &Transaction, y: f32) -> [TextLine; 4] {
    let (category, _) = truncate_graphemes(&transaction.category, MAX_CATEGORY_GRAPHEMES);

    [
        TextLine::new(transaction.date.to_string(), DATE_X, y),
        TextLine::new(transaction.transaction_type.label(), TYPE_X, y),
        TextLine::new(category, CATEGORY_X, y),
        TextLine::new(format_amount(transaction.amount), AMOUNT_X, y),
    ]
}
