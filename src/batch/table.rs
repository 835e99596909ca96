//! CSV表格读写
//! 整表读入内存；兼容 Excel 导出的首行 `sep=` 分隔符声明，写出时原样保留

use std::io::{BufRead, BufReader, Cursor, Read, Write};
use tracing::{debug, warn};

use crate::error::CatResult;

const DEFAULT_DELIMITER: u8 = b',';

/// 内存中的CSV表格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    // 首行分隔符声明（不含换行）
    pub sep_line: Option<String>,
    pub delimiter: u8,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// 列名对应的下标
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 获取列下标，不存在则在末尾追加该列（所有行补空值）
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        let idx = self.headers.len() - 1;
        for row in &mut self.rows {
            if row.len() <= idx {
                row.resize(idx + 1, String::new());
            }
        }
        idx
    }
}

/// 解析 `sep=X` 声明，返回单字节分隔符
fn parse_sep_line(line: &str) -> Option<u8> {
    let value = line.strip_prefix("sep=")?;
    match value.as_bytes() {
        [b] if b.is_ascii() => Some(*b),
        _ => {
            warn!("无法识别的分隔符声明：{:?}，回退为逗号", line);
            Some(DEFAULT_DELIMITER)
        }
    }
}

/// 读取整张CSV表格
pub fn read_table<R: Read>(reader: R) -> CatResult<Table> {
    let mut reader = BufReader::new(reader);
    let mut first_line = String::new();
    reader.read_line(&mut first_line)?;

    let trimmed = first_line.trim_start_matches('\u{feff}').trim_end_matches(['\r', '\n']);
    let (sep_line, delimiter, replay) = match parse_sep_line(trimmed) {
        Some(delimiter) => (Some(trimmed.to_string()), delimiter, String::new()),
        None => (None, DEFAULT_DELIMITER, first_line),
    };

    // 首行若不是分隔符声明，需要拼回数据流
    let source = Cursor::new(replay.into_bytes()).chain(reader);
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(source);

    let mut headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    // 超长行：表头补空列名，追加列必须落在所有已有单元格之后
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width > headers.len() {
        warn!("部分数据行比表头多{}列，已补齐空列名", width - headers.len());
        headers.resize(width, String::new());
    }
    // 短行补齐到表头宽度
    for row in &mut rows {
        if row.len() < headers.len() {
            row.resize(headers.len(), String::new());
        }
    }

    debug!(
        "CSV读取完成：列数={}，行数={}，分隔符={:?}",
        headers.len(),
        rows.len(),
        delimiter as char
    );

    Ok(Table {
        sep_line,
        delimiter,
        headers,
        rows,
    })
}

/// 写出整张CSV表格（先写分隔符声明）
pub fn write_table<W: Write>(mut writer: W, table: &Table) -> CatResult<()> {
    if let Some(sep_line) = &table.sep_line {
        writeln!(writer, "{}", sep_line)?;
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(table.delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(writer);

    csv_writer.write_record(&table.headers)?;
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
