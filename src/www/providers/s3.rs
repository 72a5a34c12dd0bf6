use crate::config::Settings;
use crate::content::Content;
use crate::credentials::{self, Prompt, Prompter};
use crate::error::{Result, WwwError};
use crate::provider::{Delivery, Provider};
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region, RequestChecksumCalculation};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use clap::Parser;
use tokio::runtime::Runtime;
use tracing::debug;

use super::parse_flags;

const ACCESS: &str = "access";
const SECRET: &str = "secret";

#[derive(Parser, Debug)]
#[command(name = "s3", bin_name = "www s3", about = "Upload standard input to an S3 bucket")]
struct S3Args {
    /// Name of file (object key)
    #[arg(long)]
    path: Option<String>,

    /// Name of bucket
    #[arg(long)]
    bucket: Option<String>,

    /// Access key (remembered for next time)
    #[arg(long)]
    access: Option<String>,

    /// Secret key (remembered for next time)
    #[arg(long)]
    secret: Option<String>,

    /// Bucket region
    #[arg(long, default_value = "us-east-1")]
    region: String,

    /// Content-Type stored with the object
    #[arg(long, default_value = "text/plain")]
    content_type: String,

    /// S3 compatible endpoint; objects are addressed path-style under it
    #[arg(long)]
    endpoint: Option<String>,
}

struct Ready {
    runtime: Runtime,
    client: Client,
    bucket: String,
    key: String,
    content_type: String,
    public_url: String,
}

/// Uploads content as a publicly readable object.
#[derive(Default)]
pub struct S3 {
    ready: Option<Ready>,
}

/// The object key is used exactly as given, minus leading slashes. Dot
/// segments are part of the key and are never resolved.
fn object_key(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Where the object can be read once uploaded.
fn public_url(endpoint: Option<&str>, bucket: &str, region: &str, key: &str) -> String {
    match endpoint {
        Some(endpoint) => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
        None if region == "us-east-1" => format!("http://{bucket}.s3.amazonaws.com/{key}"),
        None => format!("http://{bucket}.s3.{region}.amazonaws.com/{key}"),
    }
}

async fn build_client(
    access: String,
    secret: String,
    region: String,
    endpoint: Option<String>,
) -> Client {
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region))
        .credentials_provider(Credentials::new(access, secret, None, None, "www-s3"))
        .load()
        .await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared)
        .request_checksum_calculation(RequestChecksumCalculation::WhenRequired);
    if let Some(endpoint) = endpoint {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }
    Client::from_conf(builder.build())
}

impl Provider for S3 {
    fn about(&self) -> &'static str {
        "Upload to an S3 bucket as a public object"
    }

    fn setup(&mut self, settings: &mut Settings, prompter: &mut dyn Prompter) -> Result<()> {
        credentials::acquire(ACCESS, settings, prompter, Prompt::visible("Access"))?;
        credentials::acquire(SECRET, settings, prompter, Prompt::secret("Secret"))
    }

    fn initialize(
        &mut self,
        args: &[String],
        settings: &mut Settings,
        _prompter: &mut dyn Prompter,
    ) -> Result<()> {
        let args: S3Args = parse_flags("s3", args)?;

        let access = credentials::resolve(ACCESS, args.access, settings);
        let secret = credentials::resolve(SECRET, args.secret, settings);
        let (access, secret) = match (access, secret) {
            (Some(access), Some(secret)) => (access, secret),
            _ => {
                return Err(WwwError::NotSetUp {
                    provider: "s3".to_string(),
                    hint: "--access and --secret",
                });
            }
        };

        let key = match args.path.as_deref().map(object_key).filter(|k| !k.is_empty()) {
            Some(key) => key.to_string(),
            None => return Err(WwwError::missing("s3", "Path")),
        };
        let bucket = match args.bucket.filter(|b| !b.is_empty()) {
            Some(bucket) => bucket,
            None => return Err(WwwError::missing("s3", "Bucket")),
        };

        let public_url = public_url(args.endpoint.as_deref(), &bucket, &args.region, &key);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let client = runtime.block_on(build_client(
            access,
            secret,
            args.region.clone(),
            args.endpoint,
        ));

        debug!(%bucket, %key, region = %args.region, "s3 initialized");
        self.ready = Some(Ready {
            runtime,
            client,
            bucket,
            key,
            content_type: args.content_type,
            public_url,
        });
        Ok(())
    }

    fn send(&mut self, content: &Content) -> Result<Delivery> {
        let ready = self
            .ready
            .as_ref()
            .ok_or_else(|| WwwError::delivery("s3", "not initialized"))?;

        let upload = ready
            .client
            .put_object()
            .bucket(&ready.bucket)
            .key(&ready.key)
            .content_type(&ready.content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(content.as_bytes().to_vec()))
            .send();
        ready
            .runtime
            .block_on(upload)
            .map_err(|e| WwwError::delivery("s3", DisplayErrorContext(&e)))?;

        Ok(Delivery::at(
            ready.public_url.clone(),
            format!("Uploaded {} bytes", content.len()),
        ))
    }
}
