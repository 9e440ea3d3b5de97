//! Event handling module for the application.
//!
//! Terminal input is read on a background thread and handed to the main loop
//! over a channel, so the UI only ever changes state on the main thread.
//!
//! The reader thread stops when it is told to shut down, when the main loop
//! drops its receiver, or when the terminal can no longer be read; in the last
//! case [`EventHandler::next`] reports the disconnection.
use std::io::Result as IoResult;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use log::{debug, error};

/// Events that can be processed by the application.
#[derive(Debug, Clone, Copy)]
pub enum Event
{
    /// Regular time tick for redrawing.
    Tick,
    /// Key press.
    Key(KeyEvent),
    /// Terminal resize event with new dimensions.
    Resize(u16, u16),
}

/// Handles terminal events.
///
/// Owns the reader thread and the receiving end of its channel.
pub struct EventHandler
{
    /// Events coming from the reader thread.
    event_receiver: Receiver<Event>,
    /// Tells the reader thread to stop.
    shutdown_sender: Sender<()>,
    /// Reader thread, taken on drop to join it.
    thread_handle: Option<JoinHandle<()>>,
}

impl EventHandler
{
    /// Creates a new event handler with the specified tick rate.
    ///
    /// # Arguments
    ///
    /// * `tick_rate` - The duration between tick events
    ///
    /// # Returns
    ///
    /// A new `EventHandler` instance with a running reader thread.
    #[must_use]
    pub fn new(tick_rate: Duration) -> Self
    {
        let (event_sender, event_receiver) = mpsc::channel();
        let (shutdown_sender, shutdown_receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            read_events(tick_rate, &event_sender, &shutdown_receiver);
            debug!("Event reader stopped");
        });

        Self {
            event_receiver,
            shutdown_sender,
            thread_handle: Some(handle),
        }
    }

    /// Gets the next event from the event channel.
    ///
    /// This method blocks until an event is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader thread has stopped.
    pub fn next(&self) -> Result<Event>
    {
        self.event_receiver
            .recv()
            .context("Event channel disconnected")
    }
}

impl Drop for EventHandler
{
    fn drop(&mut self)
    {
        // The thread may already be gone
        let _ = self.shutdown_sender.send(());

        if let Some(handle) = self.thread_handle.take()
        {
            let _ = handle.join();
        }
    }
}

/// Reader loop run on the background thread.
fn read_events(tick_rate: Duration, sender: &Sender<Event>, shutdown: &Receiver<()>)
{
    let mut last_tick = Instant::now();

    loop
    {
        if shutdown.try_recv().is_ok()
        {
            return;
        }

        // Wait at most until the next tick is due
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        match event::poll(timeout)
        {
            Ok(true) => match read_event()
            {
                Ok(Some(event)) =>
                {
                    if sender.send(event).is_err()
                    {
                        return;
                    }
                }
                Ok(None) =>
                {}
                Err(err) =>
                {
                    error!("Error reading terminal event: {err}");
                    return;
                }
            },
            Ok(false) =>
            {}
            Err(err) =>
            {
                error!("Error polling terminal events: {err}");
                return;
            }
        }

        if last_tick.elapsed() >= tick_rate
        {
            if sender.send(Event::Tick).is_err()
            {
                return;
            }
            last_tick = Instant::now();
        }
    }
}

/// Reads one pending terminal event.
///
/// # Returns
///
/// The event, or `None` for events the app ignores.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read.
fn read_event() -> IoResult<Option<Event>>
{
    let event = match event::read()?
    {
        // Releases and repeats would toggle the menu twice on some terminals
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    };

    Ok(event)
}
