mod signaler;
mod systemd;

pub use signaler::{ProcStdinSignaler, ProcessSignaler, SignalRequest};
pub use systemd::{
    daemon_reload, install_units, render_service_unit, render_socket_unit, ServiceSpec,
};
