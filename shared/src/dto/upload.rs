use serde::{Deserialize, Serialize};

/// Response body returned by the upload endpoint after a successful
/// single-file POST. The CID addresses the stored artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub cid: String,
}

impl UploadResponse {
    /// Content-addressed URI passed on chain as the batch token URI.
    pub fn ipfs_uri(&self) -> String {
        format!("ipfs://{}", self.cid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipfs_uri() {
        let resp = UploadResponse {
            cid: "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi".to_string(),
        };
        assert_eq!(
            resp.ipfs_uri(),
            "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi"
        );
    }

    #[test]
    fn test_upload_response_decodes() {
        let resp: UploadResponse = serde_json::from_str(r#"{"cid":"QmYwAPJzv5CZsnA"}"#).unwrap();
        assert_eq!(resp.cid, "QmYwAPJzv5CZsnA");
    }
}
