//! Downloads CSV tables from open-data portals and caches them as parquet.

use crate::fetch::error::FetchError;
use crate::fetch::get_checked;
use async_compression::tokio::bufread::GzipDecoder;
use futures_util::TryStreamExt;
use log::{info, warn};
use polars::prelude::*;
use reqwest::Client;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::{fs, task, time};
use tokio_util::io::StreamReader;

/// Yearly pedestrian and bicycle counts published by the City of Zurich.
pub const ZURICH_COUNTS_2023_URL: &str = "https://data.stadt-zuerich.ch/dataset/ted_taz_verkehrszaehlungen_werte_fussgaenger_velo/download/2023_verkehrszaehlungen_werte_fussgaenger_velo.csv";

pub struct OpenDataClient {
    cache_dir: PathBuf,
    request_delay: Duration,
    download_client: Client,
}

/// Cache file name derived from the last path segment of `url`.
///
/// `.csv` and `.gz` suffixes are dropped and anything outside
/// `[A-Za-z0-9_-]` becomes `_`. A hash of the full URL is appended so that
/// equally named files from different portals get separate cache entries.
pub fn cache_file_name(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let segment = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(without_query);
    let stem = segment.trim_end_matches(".gz").trim_end_matches(".csv");
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}-{:08x}.parquet", cleaned, url_hash(url))
}

/// 32-bit FNV-1a. Stable across builds, unlike `std`'s `DefaultHasher`.
fn url_hash(url: &str) -> u32 {
    url.bytes().fold(0x811c_9dc5, |hash: u32, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}

impl OpenDataClient {
    pub fn new(cache_dir: &Path, request_delay: Duration) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            request_delay,
            download_client: Client::new(),
        }
    }

    /// Returns the table at `url`, downloading it on a cache miss.
    ///
    /// # Errors
    ///
    /// Network, decoding and CSV errors of the download, and I/O errors of
    /// the parquet cache.
    pub async fn fetch_csv(&self, url: &str) -> Result<LazyFrame, FetchError> {
        let parquet_path = self.cache_dir.join(cache_file_name(url));

        if fs::metadata(&parquet_path).await.is_ok() {
            info!("Cache hit for {} at {:?}", url, parquet_path);
        } else {
            info!("Cache miss for {}. Downloading.", url);
            let raw_bytes = self.download(url).await?;
            let df = Self::csv_to_dataframe(raw_bytes, url).await?;

            fs::create_dir_all(&self.cache_dir)
                .await
                .map_err(|e| FetchError::CacheDirCreation(self.cache_dir.clone(), e))?;
            Self::cache_dataframe(df, &parquet_path).await?;
            info!("Cached {} to {:?}", url, parquet_path);
        }

        LazyFrame::scan_parquet(&parquet_path, Default::default())
            .map_err(|e| FetchError::ParquetScan(parquet_path.clone(), e))
    }

    /// Fetches each URL in turn, pausing between requests. Failures are
    /// logged and left out of the result.
    pub async fn fetch_all(&self, urls: &[&str]) -> Vec<(String, LazyFrame)> {
        let mut frames = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            if i > 0 {
                time::sleep(self.request_delay).await;
            }
            match self.fetch_csv(url).await {
                Ok(frame) => frames.push((url.to_string(), frame)),
                Err(e) => warn!("Skipping {}: {}", url, e),
            }
        }
        frames
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        info!("Downloading data from {}", url);
        let response = get_checked(&self.download_client, url, &[]).await?;

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let stream_reader = StreamReader::new(stream);
        let mut body = Vec::new();
        if url.ends_with(".gz") {
            read_all(GzipDecoder::new(stream_reader), &mut body).await?;
        } else {
            read_all(stream_reader, &mut body).await?;
        }
        info!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Parses CSV bytes with a header row on the blocking pool.
    async fn csv_to_dataframe(bytes: Vec<u8>, url: &str) -> Result<DataFrame, FetchError> {
        let url_owned = url.to_string();
        task::spawn_blocking(move || {
            CsvReadOptions::default()
                .with_has_header(true)
                .into_reader_with_file_handle(Cursor::new(bytes))
                .finish()
                .map_err(|e| FetchError::CsvRead {
                    url: url_owned,
                    source: e,
                })
        })
        .await?
    }

    async fn cache_dataframe(mut df: DataFrame, path: &Path) -> Result<(), FetchError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let file = std::fs::File::create(&path_buf)
                .map_err(|e| FetchError::ParquetWriteIo(path_buf.clone(), e))?;
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| FetchError::ParquetWritePolars(path_buf, e))?;
            Ok::<(), FetchError>(())
        })
        .await??;
        Ok(())
    }
}

async fn read_all<R: AsyncRead + Unpin>(
    mut reader: R,
    out: &mut Vec<u8>,
) -> Result<(), FetchError> {
    reader.read_to_end(out).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_names_follow_the_url() {
        let name = cache_file_name(ZURICH_COUNTS_2023_URL);
        assert!(name.starts_with("2023_verkehrszaehlungen_werte_fussgaenger_velo-"));
        assert!(name.ends_with(".parquet"));
        assert_eq!(name, cache_file_name(ZURICH_COUNTS_2023_URL));

        let name = cache_file_name("https://example.org/data/station 12.csv.gz?token=x");
        assert!(name.starts_with("station_12-"));
        assert_eq!(name.len(), "station_12-".len() + 8 + ".parquet".len());
    }

    #[test]
    fn same_file_name_on_different_portals_gets_separate_cache_entries() {
        let zurich = cache_file_name("https://data.stadt-zuerich.ch/download/werte.csv");
        let bern = cache_file_name("https://opendata.bern.ch/download/werte.csv");
        assert_ne!(zurich, bern);
        assert!(zurich.starts_with("werte-"));
        assert!(bern.starts_with("werte-"));
    }

    #[test]
    fn url_hash_matches_fnv1a() {
        assert_eq!(url_hash(""), 0x811c_9dc5);
        assert_eq!(url_hash("a"), 0xe40c_292c);
    }

    #[tokio::test]
    async fn cached_table_is_served_without_network() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let url = "https://example.invalid/counts.csv";
        let mut df = df!("FK_STANDORT" => [1i64, 2], "VELO_IN" => [3.0, 4.0])?;
        let file = std::fs::File::create(dir.path().join(cache_file_name(url)))?;
        ParquetWriter::new(file).finish(&mut df)?;

        let client = OpenDataClient::new(dir.path(), Duration::ZERO);
        let frame = client.fetch_csv(url).await?.collect()?;
        assert_eq!(frame.height(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn parses_downloaded_bytes() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = b"FK_STANDORT,DATUM\n1,2023-01-01T00:00\n".to_vec();
        let df = OpenDataClient::csv_to_dataframe(bytes, "memory").await?;
        assert_eq!(df.shape(), (1, 2));
        Ok(())
    }
}
