use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use nonzero_ext::nonzero;
use std::{num::NonZeroU32, time::Duration};

// The portal is a public government site; stay well below anything that
// looks like load.
const REQ_PER_SEC: NonZeroU32 = nonzero!(4u32);
const MS_BETWEEN_REQ: Duration = Duration::from_millis(250);

pub struct RateLimiter {
    req_per_sec: DefaultDirectRateLimiter,
    ms_between_req: DefaultDirectRateLimiter,
}

impl RateLimiter {
    pub fn new() -> Self {
        // Limit to X total req/sec on average.
        let req_per_sec = GovernorRateLimiter::direct(Quota::per_second(REQ_PER_SEC));

        // No two requests closer than Y ms.
        let between = Quota::with_period(MS_BETWEEN_REQ).unwrap_or(Quota::per_second(REQ_PER_SEC));
        let ms_between_req = GovernorRateLimiter::direct(between);

        RateLimiter {
            req_per_sec,
            ms_between_req,
        }
    }

    pub async fn wait_until_ready(&self) {
        self.req_per_sec.until_ready().await;
        self.ms_between_req.until_ready().await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
