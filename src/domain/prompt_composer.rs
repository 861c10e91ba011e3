//! 提示词组装
//!
//! 把用户指令与面料描述合成为提交给生成服务的正/负提示词。纯函数，无 I/O

use crate::domain::generation::{ComposedPrompt, FabricDescription};

/// 描述超过该字符数才使用结构化提示词
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// 两个分支共用的负向提示词
pub const NEGATIVE_PROMPT: &str = "blur, darkness, noise, low quality, distorted, deformed, \
wrong colors, wrong pattern, different fabric, incorrect texture, wrong material";

const FIDELITY_BLOCK: &str = "REQUISITOS CRÍTICOS:
- La prenda DEBE usar EXACTAMENTE esta tela con todos sus detalles: colores, patrones, textura y material específicos mencionados arriba
- Los colores deben ser idénticos a los descritos
- El patrón debe replicarse exactamente como se describe
- La textura visible debe coincidir con la descripción
- El material debe verse como el especificado";

const PHOTOGRAPHY_BLOCK: &str = "ESTILO DE FOTOGRAFÍA:
- Fotografía profesional de moda de alta calidad
- Fondo blanco limpio
- Iluminación de estudio profesional que muestre todos los detalles de la tela
- Primer plano que permita ver claramente la textura y el patrón
- La tela debe ser el elemento principal y visible en toda la prenda";

const GENERIC_ENHANCEMENT: &str = "La prenda debe usar los colores, texturas y patrones EXACTOS \
de la tela de la imagen de referencia proporcionada. La tela debe ser visible claramente en toda \
la prenda con todos sus detalles. Alta calidad, fotografías realistas de moda profesional, fondo \
blanco, iluminación de estudio, detalles nítidos de la textura y patrón de la tela perfectamente \
visibles.";

/// 组装提示词
///
/// 描述来自视觉分析且足够长时使用结构化提示词，否则使用通用增强提示词
pub fn compose_prompt(instruction: &str, description: &FabricDescription) -> ComposedPrompt {
    let positive = if !description.degraded && description.char_len() > MIN_DESCRIPTION_CHARS {
        format!(
            "{instruction}\n\nESPECIFICACIONES EXACTAS DE LA TELA A USAR:\n{}\n\n{FIDELITY_BLOCK}\n\n{PHOTOGRAPHY_BLOCK}",
            description.text
        )
    } else {
        format!("{instruction}. {GENERIC_ENHANCEMENT}")
    };

    ComposedPrompt {
        positive,
        negative: NEGATIVE_PROMPT.to_string(),
    }
}
