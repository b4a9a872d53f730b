//! Log output setup.

use coordspace_core::settings::LogSettings;

/// Installs the global logger: stderr always, plus a file when configured.
pub fn init(settings: &LogSettings) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(settings.level)
        .chain(std::io::stderr());

    if let Some(path) = &settings.file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
