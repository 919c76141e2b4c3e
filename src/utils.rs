//! User-friendly error formatting.
//!
//! Fatal errors almost always come down to permissions on `/dev/input`
//! or `/dev/uinput`; render them with the fix next to the failure
//! instead of a bare error chain.

use std::fmt::Write;

/// Format a fatal error for user consumption, with troubleshooting hints
/// for the common failure modes.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();
    let message = format!("{error:#}");

    writeln!(&mut output).ok();
    writeln!(&mut output, "error: {error}").ok();
    writeln!(&mut output).ok();

    if is_permission_denied(error) {
        if message.contains("virtual output") {
            writeln!(&mut output, "Could not open /dev/uinput.").ok();
            writeln!(&mut output).ok();
            writeln!(&mut output, "  1. Make sure the uinput module is loaded:").ok();
            writeln!(&mut output, "     → sudo modprobe uinput").ok();
            writeln!(&mut output, "  2. Grant yourself access (or run as root):").ok();
            writeln!(&mut output, "     → add a udev rule for /dev/uinput, e.g.").ok();
            writeln!(
                &mut output,
                "       KERNEL==\"uinput\", GROUP=\"input\", MODE=\"0660\""
            )
            .ok();
        } else {
            writeln!(&mut output, "Could not read the input device.").ok();
            writeln!(&mut output).ok();
            writeln!(&mut output, "  1. Add your user to the input group:").ok();
            writeln!(&mut output, "     → sudo usermod -aG input $USER  (then re-login)").ok();
            writeln!(&mut output, "  2. Or run the daemon as root.").ok();
        }
    } else if message.contains("no scroll-capable mouse") {
        writeln!(&mut output, "No suitable mouse was detected.").ok();
        writeln!(&mut output).ok();
        writeln!(&mut output, "  1. List candidates: smooth-scroll --list-devices").ok();
        writeln!(
            &mut output,
            "  2. Pass the device node explicitly: smooth-scroll /dev/input/eventN"
        )
        .ok();
    }

    writeln!(&mut output).ok();
    writeln!(&mut output, "Technical details: {message}").ok();
    output
}

fn is_permission_denied(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
    })
}
