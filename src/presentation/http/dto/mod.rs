pub mod document_dto;
pub mod response_dto;
pub mod summary_dto;

pub use document_dto::{
    DocumentDetailDto, DocumentListResponseDto, DocumentStatusDto, StatusQueryDto,
    StatusResponseDto, UploadResponseDto,
};
pub use response_dto::{
    CODE_INTERNAL_ERROR, CODE_NOT_FOUND, CODE_UNAUTHORIZED, CODE_VALIDATION_ERROR, ErrorResponse,
    HealthResponseDto, MessageResponseDto,
};
pub use summary_dto::{SummaryDto, SummaryPreviewDto};
