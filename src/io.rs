//! File I/O around the mapper.
//!
//! Reader: JSON channel tables, either a bare `[[name, kind], …]` array or
//! `{"name": "...", "channels": [[name, kind], …]}`.  `kind` is a FIFF code
//! (`202`) or a short name (`"eog"`).
//!
//! Writer: safetensors file holding a finished mapping.
use anyhow::{bail, Context, Result};
use ndarray::{Array1, Array2, ArrayD, IxDyn};
use std::collections::HashMap;
use std::path::Path;

use crate::kind::InputChannel;
use crate::layout::CanonicalLayout;
use crate::mapping::{channels_from_table, ChannelMapping};
use crate::source::ChannelSource;

// ── Channel tables ────────────────────────────────────────────────────────────

/// Channel list of one recording loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTable {
    pub name:     String,
    pub channels: Vec<InputChannel>,
}

fn cell_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Turn a JSON array of rows into a string table, keeping whatever shape
/// the rows have so the shape check can reject it.
fn json_rows_to_table(rows: &[serde_json::Value]) -> Result<ArrayD<String>> {
    let widths: Vec<Option<usize>> = rows.iter().map(|r| r.as_array().map(Vec::len)).collect();
    let width = match widths.first() {
        None => Some(2),
        Some(&w) if widths.iter().all(|&x| x == w) => w,
        Some(_) => None,
    };
    let table = match width {
        Some(w) => {
            let cells: Vec<String> = rows
                .iter()
                .flat_map(|r| r.as_array().into_iter().flatten().map(cell_to_string))
                .collect();
            ArrayD::from_shape_vec(IxDyn(&[rows.len(), w]), cells)?
        }
        None => ArrayD::from_shape_vec(IxDyn(&[rows.len()]), rows.iter().map(cell_to_string).collect())?,
    };
    Ok(table)
}

impl ChannelTable {
    /// Parse a JSON channel table.  `fallback_name` is used when the JSON
    /// does not carry a name.
    pub fn from_json_str(text: &str, fallback_name: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).context("failed to parse channel table JSON")?;

        let (name, rows) = match &value {
            serde_json::Value::Array(rows) => (fallback_name.to_string(), rows),
            serde_json::Value::Object(obj) => {
                let rows = obj
                    .get("channels")
                    .and_then(|c| c.as_array())
                    .context("missing 'channels' array")?;
                let name = obj
                    .get("name")
                    .and_then(|n| n.as_str())
                    .unwrap_or(fallback_name)
                    .to_string();
                (name, rows)
            }
            _ => bail!("channel table must be a JSON array or object"),
        };

        let table = json_rows_to_table(rows)?;
        let channels = channels_from_table(table.view())?;
        Ok(Self { name, channels })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading channel table {}", path.display()))?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_json_str(&text, &stem)
    }

    pub fn names(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.name.clone()).collect()
    }
}

impl ChannelSource for ChannelTable {
    fn source_id(&self) -> String {
        self.name.clone()
    }

    fn channels(&self) -> Vec<InputChannel> {
        self.channels.clone()
    }
}

// ── Safetensors writer ────────────────────────────────────────────────────────

/// One tensor queued in a [`StWriter`].
struct PendingTensor {
    name:  String,
    dtype: &'static str,
    shape: Vec<usize>,
    data:  Vec<u8>,
}

/// Minimal safetensors writer for F32, I32 and U8 tensors.
///
/// Tensors are laid out in insertion order; the JSON header is padded with
/// spaces to an 8-byte boundary.
///
/// ```rust,no_run
/// use chanmap::io::StWriter;
/// use std::path::Path;
/// let mut w = StWriter::new();
/// w.add_f32("weights", &[1.0f32, 0.0, 0.0, 1.0], &[2, 2]);
/// w.add_strings("names", &["Fp1", "Cz"]);
/// w.write(Path::new("/tmp/out.safetensors")).unwrap();
/// ```
#[derive(Default)]
pub struct StWriter {
    tensors: Vec<PendingTensor>,
}

impl StWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, dtype: &'static str, shape: &[usize], data: Vec<u8>) {
        self.tensors.push(PendingTensor { name: name.to_string(), dtype, shape: shape.to_vec(), data });
    }

    pub fn add_f32(&mut self, name: &str, data: &[f32], shape: &[usize]) {
        self.push(name, "F32", shape, data.iter().flat_map(|v| v.to_le_bytes()).collect());
    }

    pub fn add_i32(&mut self, name: &str, data: &[i32], shape: &[usize]) {
        self.push(name, "I32", shape, data.iter().flat_map(|v| v.to_le_bytes()).collect());
    }

    pub fn add_f32_arr2(&mut self, name: &str, arr: &Array2<f32>) {
        let data: Vec<f32> = arr.iter().copied().collect();
        self.add_f32(name, &data, &[arr.nrows(), arr.ncols()]);
    }

    pub fn add_f32_arr1(&mut self, name: &str, arr: &Array1<f32>) {
        let data: Vec<f32> = arr.iter().copied().collect();
        self.add_f32(name, &data, &[arr.len()]);
    }

    /// Store strings newline-joined as a U8 blob.
    pub fn add_strings<S: AsRef<str>>(&mut self, name: &str, strings: &[S]) {
        let joined = strings.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
        let len = joined.len();
        self.push(name, "U8", &[len], joined.into_bytes());
    }

    /// Serialise every queued tensor into one safetensors buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut header = serde_json::Map::new();
        let mut end = 0usize;
        for t in &self.tensors {
            let start = end;
            end += t.data.len();
            header.insert(t.name.clone(), serde_json::json!({
                "dtype": t.dtype,
                "shape": t.shape,
                "data_offsets": [start, end],
            }));
        }

        let mut json = serde_json::to_vec(&header)?;
        json.resize(json.len().next_multiple_of(8), b' ');

        let mut out = Vec::with_capacity(8 + json.len() + end);
        out.extend_from_slice(&(json.len() as u64).to_le_bytes());
        out.extend_from_slice(&json);
        for t in &self.tensors {
            out.extend_from_slice(&t.data);
        }
        Ok(out)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)
            .with_context(|| format!("writing {}", path.display()))
    }
}

/// Write a mapping to `path`.
///
/// Keys: `mapping` F32 `[C, 90]`, `column_sums` F32 `[90]`, `ch_names` and
/// `layout_names` as newline-joined U8 blobs, `layout_kinds` I32 `[90]`
/// (kind code per canonical slot).
pub fn write_mapping<S: AsRef<str>>(
    mapping: &ChannelMapping,
    ch_names: &[S],
    layout: &CanonicalLayout,
    path: &Path,
) -> Result<()> {
    let slots = layout.channel_table();
    let names: Vec<&str> = slots.iter().map(|c| c.name.as_str()).collect();
    let kinds: Vec<i32> = slots.iter().filter_map(|c| c.kind).map(|k| k.code()).collect();

    let mut w = StWriter::new();
    w.add_f32_arr2("mapping", &mapping.matrix);
    w.add_f32_arr1("column_sums", &mapping.column_sums);
    w.add_strings("ch_names", ch_names);
    w.add_strings("layout_names", &names);
    w.add_i32("layout_kinds", &kinds, &[kinds.len()]);
    w.write(path)
}

// ── Safetensors reader ────────────────────────────────────────────────────────

fn parse_header(bytes: &[u8]) -> Result<(HashMap<String, serde_json::Value>, usize)> {
    if bytes.len() < 8 {
        bail!("safetensors file too small");
    }
    let n = usize::try_from(u64::from_le_bytes(bytes[..8].try_into()?))
        .context("safetensors header length does not fit in memory")?;
    let data_start = 8usize
        .checked_add(n)
        .context("safetensors header length overflows")?;
    let raw = bytes.get(8..data_start).context("safetensors header truncated")?;
    let header: HashMap<String, serde_json::Value> =
        serde_json::from_slice(raw).context("failed to parse safetensors header")?;
    Ok((header, data_start))
}

fn tensor_bytes<'a>(
    bytes: &'a [u8],
    data_start: usize,
    entry: &serde_json::Value,
) -> Result<&'a [u8]> {
    let offsets = entry["data_offsets"].as_array().context("missing data_offsets")?;
    let offset = |k: usize| -> Result<usize> {
        let v = offsets.get(k).and_then(|v| v.as_u64()).context("bad data_offsets")?;
        usize::try_from(v)
            .ok()
            .and_then(|v| data_start.checked_add(v))
            .context("tensor data offset overflows")
    };
    let (s, e) = (offset(0)?, offset(1)?);
    if s > e {
        bail!("tensor data offsets reversed: {s} > {e}");
    }
    bytes.get(s..e).context("tensor data out of bounds")
}

/// A mapping read back from [`write_mapping`] output.
#[derive(Debug, Clone)]
pub struct StoredMapping {
    pub matrix:       Array2<f32>,
    pub ch_names:     Vec<String>,
    /// Kind code per canonical slot; empty when the file has none.
    pub layout_kinds: Vec<i32>,
}

impl StoredMapping {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_bytes(&bytes)
            .with_context(|| format!("decoding {}", path.display()))
    }

    /// Decode an in-memory safetensors buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, data_start) = parse_header(bytes)?;

        let entry = header.get("mapping").context("missing 'mapping' key")?;
        let shape: Vec<usize> = entry["shape"]
            .as_array()
            .context("missing shape")?
            .iter()
            .filter_map(|v| v.as_u64().map(|x| x as usize))
            .collect();
        if shape.len() != 2 {
            bail!("'mapping' must be 2-D, got shape {shape:?}");
        }
        let values: Vec<f32> = tensor_bytes(bytes, data_start, entry)?
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        let matrix = Array2::from_shape_vec((shape[0], shape[1]), values)?;

        let ch_names = match header.get("ch_names") {
            Some(e) => std::str::from_utf8(tensor_bytes(bytes, data_start, e)?)?
                .split('\n')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            None => vec![],
        };

        let layout_kinds = match header.get("layout_kinds") {
            Some(e) => tensor_bytes(bytes, data_start, e)?
                .chunks_exact(4)
                .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
            None => vec![],
        };

        Ok(Self { matrix, ch_names, layout_kinds })
    }
}
