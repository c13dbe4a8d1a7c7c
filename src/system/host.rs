use std::env;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind, Users};

use super::{HostIdentity, HostInfo};
use crate::core::SystemError;

#[derive(Debug, Clone, Copy, Default)]
pub struct OsHost;

/// Owner of this process, looked up in the OS user database.
fn process_username() -> Option<String> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        ProcessRefreshKind::new().with_user(UpdateKind::Always),
    );
    let uid = system.process(pid)?.user_id()?;

    let users = Users::new_with_refreshed_list();
    users
        .get_user_by_id(uid)
        .map(|user| user.name().to_string())
        .filter(|name| !name.is_empty())
}

fn env_username() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

impl HostIdentity for OsHost {
    fn host_info(&self) -> Result<HostInfo, SystemError> {
        let username = process_username()
            .or_else(env_username)
            .ok_or(SystemError::Unavailable("username"))?;
        let hostname = System::host_name().ok_or(SystemError::Unavailable("hostname"))?;
        Ok(HostInfo {
            username,
            hostname,
            os: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
        })
    }
}
