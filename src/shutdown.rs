use std::io;

use tokio::signal;

use crate::event_loop::StopHandle;

/// Exit status used when a second signal cuts the run short.
pub const FORCED_EXIT_CODE: i32 = 130;

#[cfg(unix)]
type Terminate = signal::unix::Signal;

#[cfg(not(unix))]
type Terminate = ();

async fn next_signal(terminate: &mut Terminate) -> &'static str {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Ctrl+C handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        terminate.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = {
        let _ = terminate;
        std::future::pending::<()>()
    };

    tokio::select! {
        () = ctrl_c => "interrupt",
        () = terminate => "terminate",
    }
}

/// Fires `interrupt` on the first Ctrl+C or SIGTERM and exits the process
/// with [`FORCED_EXIT_CODE`] on the second.
///
/// Handlers are installed before returning so a failure surfaces to the
/// caller instead of inside the background task.
pub fn listen(interrupt: StopHandle) -> io::Result<()> {
    #[cfg(unix)]
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    #[cfg(not(unix))]
    let mut terminate = ();

    tokio::spawn(async move {
        let first = next_signal(&mut terminate).await;
        tracing::info!(signal = first, "shutting down");
        interrupt.stop();

        let second = next_signal(&mut terminate).await;
        tracing::warn!(signal = second, "second signal, exiting immediately");
        std::process::exit(FORCED_EXIT_CODE);
    });

    Ok(())
}
