//! Per-console session state: mode, interface scope, and the append-only
//! transcript the terminal renders.

use netlab_model::{Device, TopologyStore};
use netlab_types::{NetlabError, Result};

use crate::command::{CommandContext, Mode, ScopeChange};
use crate::registry::Registry;

/// Render the prompt for a device in a given mode. Hosts always show the
/// Windows shell prompt; Cisco devices show hostname plus a mode suffix.
pub fn render_prompt(device: &Device, mode: Mode) -> String {
    if device.kind.is_host() {
        return "C:\\Users\\Administrator>".to_string();
    }
    let hostname = device.display_hostname();
    match mode {
        Mode::User => format!("{hostname}>"),
        Mode::Privileged => format!("{hostname}#"),
        Mode::Config => format!("{hostname}(config)#"),
        Mode::Interface => format!("{hostname}(config-if)#"),
    }
}

/// One open console onto one device.
///
/// The session owns its registry, mode, scope, and transcript; the topology
/// stays outside and is passed into [`Session::submit`] so many sessions can
/// share one store. The transcript always ends with the current prompt while
/// the session is open.
pub struct Session {
    device_id: String,
    registry: Registry,
    mode: Mode,
    scope: Option<String>,
    transcript: Vec<String>,
    closed: bool,
}

impl Session {
    /// Open a console onto the device: connect banner, blank line, prompt.
    pub fn open(store: &dyn TopologyStore, device_id: &str) -> Result<Self> {
        let device = store
            .device(device_id)
            .ok_or_else(|| NetlabError::UnknownDevice(device_id.to_string()))?;
        let mode = Mode::User;
        let transcript = vec![
            format!("Connecting to {}...", device.label),
            String::new(),
            render_prompt(device, mode),
        ];
        Ok(Self {
            device_id: device_id.to_string(),
            registry: Registry::for_kind(device.kind),
            mode,
            scope: None,
            transcript,
            closed: false,
        })
    }

    /// Feed one input line through the registry and fold the result into
    /// the session: echo, output, mode/scope transitions, close.
    pub fn submit(&mut self, store: &mut dyn TopologyStore, input: &str) -> Result<()> {
        if self.closed {
            return Err(NetlabError::Session("session is closed".to_string()));
        }
        let device = store
            .device(&self.device_id)
            .ok_or_else(|| NetlabError::UnknownDevice(self.device_id.clone()))?
            .clone();

        self.transcript
            .push(format!("{} {input}", render_prompt(&device, self.mode)));

        let mut ctx = CommandContext {
            device,
            mode: self.mode,
            scope: self.scope.clone(),
            store: &mut *store,
        };
        let result = self.registry.execute(input, &mut ctx);

        if let Some(mode) = result.new_mode {
            self.mode = mode;
        }
        match result.scope {
            ScopeChange::Unchanged => {}
            ScopeChange::Clear => self.scope = None,
            ScopeChange::Enter(name) => self.scope = Some(name),
        }

        if result.close {
            self.transcript.extend(result.output);
            self.closed = true;
            return Ok(());
        }

        // Prompt is re-rendered from the live device: `hostname` takes
        // effect on the very next line.
        let prompt = match store.device(&self.device_id) {
            Some(device) => render_prompt(device, self.mode),
            None => return Err(NetlabError::UnknownDevice(self.device_id.clone())),
        };

        if result.clear_screen {
            self.transcript = vec![prompt];
            return Ok(());
        }

        self.transcript.extend(result.output);
        self.transcript.push(prompt);
        Ok(())
    }

    /// The device this console is attached to.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Current operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current interface scope, if any.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Everything rendered so far, prompt included.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Whether `exit` tore the console down.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
