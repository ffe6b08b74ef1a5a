use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const LOCAL_FUNCTION_NAME: &str = "local-proxy-handler";
pub const LOCAL_FUNCTION_ARN: &str =
    "arn:aws:lambda:local:123456789012:function:local-proxy-handler";
pub const LOCAL_REQUEST_ID: &str = "local-request-id";

/// Capabilities a hosting runtime hands to a handler alongside the event.
pub trait InvocationContext {
    fn request_id(&self) -> &str;
    fn function_name(&self) -> &str;
    fn invoked_function_arn(&self) -> &str;
    fn deadline(&self) -> SystemTime;

    fn remaining_time(&self) -> Duration {
        self.deadline()
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO)
    }
}

/// Exposes the Lambda runtime's per-invocation context through
/// [`InvocationContext`].
pub struct LambdaContextAdapter<'a> {
    context: &'a lambda_runtime::Context,
}

impl<'a> LambdaContextAdapter<'a> {
    pub fn new(context: &'a lambda_runtime::Context) -> Self {
        Self { context }
    }
}

impl InvocationContext for LambdaContextAdapter<'_> {
    fn request_id(&self) -> &str {
        &self.context.request_id
    }

    fn function_name(&self) -> &str {
        &self.context.env_config.function_name
    }

    fn invoked_function_arn(&self) -> &str {
        &self.context.invoked_function_arn
    }

    fn deadline(&self) -> SystemTime {
        // The runtime reports the deadline in epoch milliseconds.
        UNIX_EPOCH + Duration::from_millis(self.context.deadline)
    }
}

/// Fixed placeholder context for driving a handler without a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalContext {
    pub request_id: String,
    pub function_name: String,
    pub invoked_function_arn: String,
    pub deadline: SystemTime,
}

impl LocalContext {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            request_id: LOCAL_REQUEST_ID.to_string(),
            function_name: LOCAL_FUNCTION_NAME.to_string(),
            invoked_function_arn: LOCAL_FUNCTION_ARN.to_string(),
            deadline: SystemTime::now() + timeout,
        }
    }
}

impl InvocationContext for LocalContext {
    fn request_id(&self) -> &str {
        &self.request_id
    }

    fn function_name(&self) -> &str {
        &self.function_name
    }

    fn invoked_function_arn(&self) -> &str {
        &self.invoked_function_arn
    }

    fn deadline(&self) -> SystemTime {
        self.deadline
    }
}
