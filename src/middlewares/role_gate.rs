//! 역할 기반 접근 제어 미들웨어
//!
//! [`AuthMiddleware`](super::AuthMiddleware)가 넣어 둔 클레임의 `role`이
//! 요구 역할과 정확히 같을 때만 요청을 통과시킵니다. 역할 간 계층은 없습니다.
//!
//! 클레임이 없으면(인증 미들웨어 없이 장착된 경우 포함) 항상 403입니다.
//!
//! # 장착 순서
//!
//! actix-web은 마지막에 `wrap`한 미들웨어를 먼저 실행하므로 인증을 나중에 감쌉니다.
//!
//! ```rust,ignore
//! web::scope("/admin")
//!     .wrap(RoleGate::require("admin"))
//!     .wrap(AuthMiddleware::required())
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::token::Claims;
use crate::errors::AppError;

/// 단일 역할 요구 미들웨어
#[derive(Debug, Clone)]
pub struct RoleGate {
    required: Rc<str>,
}

impl RoleGate {
    pub fn require(role: &str) -> Self {
        Self {
            required: Rc::from(role),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RoleGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGateService {
            service: Rc::new(service),
            required: self.required.clone(),
        }))
    }
}

pub struct RoleGateService<S> {
    service: Rc<S>,
    required: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for RoleGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required = self.required.clone();

        Box::pin(async move {
            let allowed = match req.extensions().get::<Claims>() {
                Some(claims) if claims.role == *required => true,
                Some(claims) => {
                    log::warn!(
                        "권한 부족: 계정 ID {} ({}), 필요 권한: {}",
                        claims.sub,
                        claims.role,
                        required
                    );
                    false
                }
                None => {
                    log::warn!("권한 확인 불가: 인증 클레임 없음 {}", req.path());
                    false
                }
            };

            if !allowed {
                let error = AppError::AuthorizationDenied(format!("`{}` role required", required));
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, error.error_response()).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
