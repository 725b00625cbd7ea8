//! Printer adapters for sending ESC/POS data
//!
//! Supports:
//! - The Unix print queue (`lp`, or any command reading the job on stdin)
//! - Windows driver printers (via Win32 API)
//!
//! Exactly one adapter is active per process; [`SystemPrinter::detect`]
//! picks it at startup.

use crate::error::{PrintError, PrintResult};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{info, instrument, warn};

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;
}

/// Print-queue command printer (`lp` by default)
///
/// The job is piped verbatim to the command's standard input, so the
/// queue must be configured as a raw queue for control codes to reach
/// the device.
#[derive(Debug, Clone)]
pub struct LpPrinter {
    program: String,
    args: Vec<String>,
}

impl LpPrinter {
    /// Create a printer that submits jobs to the default queue via `lp`
    pub fn new() -> Self {
        Self {
            program: "lp".to_string(),
            args: Vec::new(),
        }
    }

    /// Use a custom program and arguments instead of `lp`
    pub fn with_command<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a whitespace-separated command line (e.g. `"lp -d receipts -o raw"`)
    pub fn from_command_line(line: &str) -> PrintResult<Self> {
        let mut parts = line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| PrintError::InvalidConfig("Empty printer command".to_string()))?;
        Ok(Self::with_command(program, parts))
    }

    /// Get the spooler program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Get the spooler arguments
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for LpPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer for LpPrinter {
    #[instrument(skip(self, data), fields(program = %self.program, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Submitting print job");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PrintError::Spooler(format!("{}: {}", self.program, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| PrintError::Spooler("Spooler stdin unavailable".to_string()))?;

        let written = stdin.write_all(data).await;
        // Closing stdin signals end of job
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "Spooler rejected print job");
            return Err(PrintError::Spooler(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| {
            PrintError::Io(std::io::Error::new(
                e.kind(),
                format!("Write failed: {}", e),
            ))
        })?;

        info!("Print job sent successfully");
        Ok(())
    }
}

/// Windows driver printer
///
/// Uses Win32 API to print through installed printer drivers. The
/// host's default printer is looked up on every job.
#[cfg(windows)]
#[derive(Debug, Clone, Default)]
pub struct WindowsPrinter;

#[cfg(windows)]
mod win32 {
    use windows::Win32::Graphics::Printing::{
        ClosePrinter, EndDocPrinter, EndPagePrinter, PRINTER_HANDLE,
    };

    pub(super) fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    /// Open printer handle, closed on drop
    pub(super) struct HandleGuard(pub(super) PRINTER_HANDLE);

    impl Drop for HandleGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = ClosePrinter(self.0);
            }
        }
    }

    /// Started document, ended on drop
    pub(super) struct DocGuard(pub(super) PRINTER_HANDLE);

    impl Drop for DocGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = EndDocPrinter(self.0);
            }
        }
    }

    /// Started page, ended on drop
    pub(super) struct PageGuard(pub(super) PRINTER_HANDLE);

    impl Drop for PageGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = EndPagePrinter(self.0);
            }
        }
    }
}

#[cfg(windows)]
impl WindowsPrinter {
    /// Create a printer that always targets the current default device
    pub fn default_device() -> Self {
        Self
    }

    /// Get the default printer name
    pub fn default_printer() -> PrintResult<Option<String>> {
        use windows::Win32::Graphics::Printing::GetDefaultPrinterW;
        use windows::core::PWSTR;

        unsafe {
            let mut needed: u32 = 0;
            let _ = GetDefaultPrinterW(None, &mut needed);

            if needed == 0 {
                return Ok(None);
            }

            let mut buf: Vec<u16> = vec![0; needed as usize];
            let ok = GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed);

            if !ok.as_bool() {
                return Ok(None);
            }

            let name = PWSTR(buf.as_mut_ptr())
                .to_string()
                .map_err(|e| PrintError::WindowsPrinter(format!("UTF-16 decode failed: {}", e)))?;

            Ok(Some(name))
        }
    }

    /// Send raw ESC/POS data synchronously (for use from sync/blocking contexts)
    pub fn print_sync(&self, data: &[u8]) -> PrintResult<()> {
        let name = Self::default_printer()?.ok_or(PrintError::NoDefaultPrinter)?;
        Self::write_raw(&name, data)
    }

    fn write_raw(name: &str, data: &[u8]) -> PrintResult<()> {
        use core::ffi::c_void;
        use win32::{DocGuard, HandleGuard, PageGuard, to_wide};
        use windows::Win32::Graphics::Printing::{
            DOC_INFO_1W, OpenPrinterW, PRINTER_HANDLE, StartDocPrinterW, StartPagePrinter,
            WritePrinter,
        };
        use windows::core::{PCWSTR, PWSTR};

        info!(printer = name, bytes = data.len(), "Writing raw job");

        unsafe {
            let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
            let name_w = to_wide(name);

            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|_| PrintError::WindowsPrinter("OpenPrinterW failed".to_string()))?;
            let handle = HandleGuard(handle);

            let doc_name_w = to_wide("Receipt");
            let datatype_w = to_wide("RAW");
            let doc_info = DOC_INFO_1W {
                pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
                pOutputFile: PWSTR::null(),
                pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
            };

            if StartDocPrinterW(handle.0, 1, &doc_info as *const DOC_INFO_1W) == 0 {
                return Err(PrintError::WindowsPrinter(
                    "StartDocPrinter failed".to_string(),
                ));
            }
            let doc = DocGuard(handle.0);

            if !StartPagePrinter(doc.0).as_bool() {
                return Err(PrintError::WindowsPrinter(
                    "StartPagePrinter failed".to_string(),
                ));
            }
            let page = PageGuard(doc.0);

            let mut written: u32 = 0;
            let ok = WritePrinter(
                page.0,
                data.as_ptr() as *const c_void,
                data.len() as u32,
                &mut written,
            );

            if !ok.as_bool() {
                return Err(PrintError::WindowsPrinter(
                    "WritePrinter failed".to_string(),
                ));
            }

            if written != data.len() as u32 {
                return Err(PrintError::WindowsPrinter("Incomplete write".to_string()));
            }

            // Guards drop in reverse order: page, document, handle
            Ok(())
        }
    }
}

#[cfg(windows)]
impl Printer for WindowsPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        // Windows printing is synchronous, run in blocking task
        let printer = self.clone();
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || printer.print_sync(&data))
            .await
            .map_err(|e| PrintError::WindowsPrinter(format!("Task join failed: {}", e)))?
    }
}

/// The host's print path, chosen once at startup
#[derive(Debug, Clone)]
pub enum SystemPrinter {
    /// Print-queue command
    Spooler(LpPrinter),
    /// Win32 spooler
    #[cfg(windows)]
    Windows(WindowsPrinter),
}

impl SystemPrinter {
    /// Select the printer for this host
    ///
    /// A configured command line always wins; otherwise Windows uses the
    /// default driver printer and every other platform uses `lp`.
    pub fn detect(command: Option<&str>) -> PrintResult<Self> {
        if let Some(line) = command {
            return Ok(Self::Spooler(LpPrinter::from_command_line(line)?));
        }

        #[cfg(windows)]
        let printer = Self::Windows(WindowsPrinter::default_device());
        #[cfg(not(windows))]
        let printer = Self::Spooler(LpPrinter::new());

        Ok(printer)
    }
}

impl Printer for SystemPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        match self {
            Self::Spooler(p) => p.print(data).await,
            #[cfg(windows)]
            Self::Windows(p) => p.print(data).await,
        }
    }
}
