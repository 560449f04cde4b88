use crate::{
    errors::Result,
    models::{ReportFormat, payload::Record},
};
use std::io::Write;

/// 报告输出，每条记录一行。
pub struct Reporter<W: Write> {
    format: ReportFormat,
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(format: ReportFormat, out: W) -> Self {
        Reporter { format, out }
    }

    pub fn emit(&mut self, record: &Record) -> Result<()> {
        match self.format {
            ReportFormat::Text => writeln!(self.out, "{}", text_line(record))?,
            ReportFormat::Json => {
                // 先完整序列化，失败时不留下半行输出
                let mut line = serde_json::to_vec(record)?;
                line.push(b'\n');
                self.out.write_all(&line)?;
            }
        }
        // 删除前必须确保报告已经落到输出上
        self.out.flush()?;

        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn text_line(record: &Record) -> String {
    match record {
        Record::Candidate(c) => format!(
            "{}, {}, {}, size={}",
            c.path.display(),
            c.owner,
            c.modified_at.format("%Y-%m-%dT%H:%M:%S%.3f"),
            c.size
        ),
        Record::Deleting { path } => format!("Deleting {}", path.display()),
        Record::Failure(f) => format!("Failed {}: {}", f.path.display(), f.error),
        Record::Summary(s) => format!("Savings : {}", s.total_bytes),
    }
}
