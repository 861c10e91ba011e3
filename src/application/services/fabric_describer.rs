//! Fabric Describer - 面料描述获取
//!
//! 两级策略：一次结构化分析，结果过短时再补充一次。任何失败都降级为通用描述，
//! 不会让整个流水线失败

use std::sync::Arc;

use crate::application::ports::{CredentialsPort, FabricVisionPort, VisionCall};
use crate::domain::generation::{FabricDescription, GenerationRequest};

/// 首次分析结果少于该字符数时发起补充分析
pub const SUPPLEMENT_THRESHOLD_CHARS: usize = 200;

/// 结构化面料分析指令
pub const ANALYSIS_INSTRUCTION: &str = "Analiza esta imagen de tela/textil con EXTREMO DETALLE. \
Eres un experto en textiles y necesitas describir EXACTAMENTE esta tela para que pueda ser replicada fielmente.

ANÁLISIS REQUERIDO (responde en español, punto por punto):

COLORES:
- Colores principales exactos (nombres específicos: azul marino, rojo carmesí, verde esmeralda, etc.)
- Colores secundarios o de acento
- Distribución de los colores (proporciones, ubicación)
- Matices o tonos específicos
- ¿Es un color sólido o tiene variaciones?

PATRÓN/DISEÑO:
- Tipo de patrón exacto (floral, geométrico, abstracto, rayas, puntos, cuadros, etc.)
- Tamaño del patrón (pequeño, mediano, grande)
- Distribución del patrón (repetitivo, irregular, simétrico, etc.)
- Detalles del patrón (si es floral: tipo de flores, cantidad, disposición)
- Si hay rayas: dirección (horizontales, verticales, diagonales), grosor, espaciado
- Si hay puntos: tamaño, densidad, distribución

TEXTURA:
- Tipo de textura visible (lisa, rugosa, con relieve, satinada, mate, etc.)
- Estructura del tejido (tela, punto, etc.)
- Grosor aparente (delgada, media, gruesa)
- Brillo o acabado (brillante, mate, satinado)
- Superficie (plana, con textura 3D, etc.)

MATERIAL:
- Material aparente (algodón, seda, lino, poliéster, lana, etc.)
- Acabado del material (algodón crudo, seda satinada, etc.)

DETALLES ESPECÍFICOS:
- Cualquier detalle único o distintivo
- Repetición del patrón (si aplica)
- Bordes o terminaciones visibles
- Efectos especiales (estampado, bordado, etc.)

IMPORTANTE: Responde de forma estructurada y MUY específica. Cada detalle cuenta para replicar esta tela exactamente.";

/// 补充分析指令，以首次结果为上下文
pub fn supplementary_instruction(first: &str) -> String {
    format!(
        "Basándote en la descripción anterior: \"{first}\", proporciona detalles adicionales ESPECÍFICOS sobre:
- Colores exactos con sus nombres técnicos (ej: \"azul cobalto\" no \"azul\")
- Descripción precisa del patrón con medidas aproximadas
- Detalles de textura y material que sean identificables visualmente

Responde en español, siendo MUY específico y técnico."
    )
}

/// 面料描述服务
pub struct FabricDescriber {
    vision: Arc<dyn FabricVisionPort>,
    credentials: Arc<dyn CredentialsPort>,
}

impl FabricDescriber {
    pub fn new(vision: Arc<dyn FabricVisionPort>, credentials: Arc<dyn CredentialsPort>) -> Self {
        Self {
            vision,
            credentials,
        }
    }

    /// 获取面料描述，失败时返回降级描述
    pub async fn describe(&self, request: &GenerationRequest) -> FabricDescription {
        let Some(api_key) = self.credentials.vision_api_key() else {
            tracing::warn!("Vision API key not configured, using generic fabric description");
            return FabricDescription::fallback();
        };

        tracing::info!(
            image_size = request.image_bytes().len(),
            mime_type = %request.mime_type(),
            "Analyzing fabric image"
        );

        let first = match self
            .vision
            .analyze(&api_key, vision_call(request, ANALYSIS_INSTRUCTION))
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Fabric analysis failed, using generic description");
                return FabricDescription::fallback();
            }
        };

        let first_len = first.chars().count();
        tracing::debug!(text_len = first_len, "Fabric description received");

        if first_len >= SUPPLEMENT_THRESHOLD_CHARS {
            return FabricDescription::analyzed(first);
        }

        tracing::info!(
            text_len = first_len,
            "Fabric description too short, requesting supplementary analysis"
        );

        let supplement = supplementary_instruction(&first);
        match self
            .vision
            .analyze(&api_key, vision_call(request, &supplement))
            .await
        {
            Ok(extra) => {
                FabricDescription::analyzed(format!("{first}\n\nDetalles complementarios: {extra}"))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Supplementary analysis failed, keeping first description");
                FabricDescription::analyzed(first)
            }
        }
    }
}

fn vision_call<'a>(request: &'a GenerationRequest, instruction: &'a str) -> VisionCall<'a> {
    VisionCall {
        image_bytes: request.image_bytes(),
        mime_type: request.mime_type(),
        instruction,
    }
}
