//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::token::Claims;
use crate::errors::AppError;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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

        Box::pin(async move {
            // 앱에 등록된 TokenService 가져오기
            let Some(token_service) = req.app_data::<web::Data<TokenService>>().cloned() else {
                log::error!("TokenService가 app_data에 등록되지 않았습니다");
                let error = AppError::InternalError("token service is not configured".to_string());
                return Ok(reject(req, error.error_response()));
            };

            match authenticate(&req, &token_service) {
                Ok(claims) => {
                    log::debug!("인증 성공: 계정 ID {}", claims.sub);
                    // 클레임을 Request Extensions에 저장
                    req.extensions_mut().insert(claims);
                }
                Err(err) => {
                    log::warn!("인증 실패: {} {}", req.method(), req.path());
                    return Ok(reject(req, err.error_response()));
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 다음 서비스를 호출하지 않고 응답을 반환합니다.
fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 요청에서 Bearer 토큰을 추출하고 검증
///
/// 헤더 없음, UTF-8이 아닌 헤더, 형식 오류, 토큰 검증 실패는 모두
/// 같은 `AuthenticationFailed`가 됩니다.
fn authenticate(req: &ServiceRequest, token_service: &TokenService) -> Result<Claims, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::AuthenticationFailed)?;

    let token = TokenService::extract_bearer_token(auth_header)?;

    Ok(token_service.validate(token)?)
}
