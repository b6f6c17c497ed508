//! Access QR generation.
//!
//! The verdict is presented at campus checkpoints as a QR image rendered
//! by a third-party generator; this module only builds the URL, which
//! cannot fail.

use crate::models::Residence;

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_SIZE: &str = "300x300";

/// Denied access, any residence.
pub const COLOR_DENIED: &str = "f44336";
/// Allowed, on-campus students.
pub const COLOR_INTERNAL: &str = "43a047";
/// Allowed, off-campus or unknown residence.
pub const COLOR_EXTERNAL: &str = "1e88e5";

/// Build the color-coded QR image URL for one user's verdict.
pub fn access_qr_url(user_id: &str, allow_access: bool, residence: Residence) -> String {
    let color = if !allow_access {
        COLOR_DENIED
    } else if residence == Residence::Internal {
        COLOR_INTERNAL
    } else {
        COLOR_EXTERNAL
    };

    format!("{QR_ENDPOINT}?data={user_id}&size={QR_SIZE}&color={color}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_user_id_and_size() {
        let url = access_qr_url("1190123", true, Residence::External);
        assert!(url.starts_with(QR_ENDPOINT));
        assert!(url.contains("data=1190123"));
        assert!(url.contains("size=300x300"));
    }

    #[test]
    fn denied_is_red_regardless_of_residence() {
        for residence in [Residence::Internal, Residence::External, Residence::Unknown] {
            let url = access_qr_url("1190123", false, residence);
            assert!(url.contains(COLOR_DENIED));
        }
    }

    #[test]
    fn allowed_color_follows_residence() {
        assert!(access_qr_url("1190123", true, Residence::Internal).contains(COLOR_INTERNAL));
        assert!(access_qr_url("1190123", true, Residence::External).contains(COLOR_EXTERNAL));
        // Unknown residence renders like external
        assert!(access_qr_url("1190123", true, Residence::Unknown).contains(COLOR_EXTERNAL));
    }
}
