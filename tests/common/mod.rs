#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_xlsxwriter::Workbook;
use table_comparator::error::LlmError;
use table_comparator::ContentGenerator;

/// Write a workbook where each sheet has a `Canal | Faturado | Não faturado`
/// header followed by `rows` data rows
pub fn write_workbook(path: &Path, sheets: &[(&str, u32)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        worksheet.write_string(0, 0, "Canal").unwrap();
        worksheet.write_string(0, 1, "Faturado").unwrap();
        worksheet.write_string(0, 2, "Não faturado").unwrap();
        for r in 1..=*rows {
            worksheet.write_string(r, 0, format!("{} {}", name, r)).unwrap();
            worksheet.write_number(r, 1, f64::from(r) * 100.0).unwrap();
            worksheet.write_number(r, 2, f64::from(r) + 0.5).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

/// Generator that records prompts and answers with a fixed reply
pub struct RecordingGenerator {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "recording"
    }
}
