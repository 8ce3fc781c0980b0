use std::sync::Arc;

use anyhow::{Context as _, Result};
use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::Camera;
use crate::light::ShadingModel;
use crate::mesh::{ShapeKind, Vertex};
use crate::scene::SceneState;
use crate::types::{LightUniform, MaterialUniform, ShapeUniforms, SolidUniform};
use crate::ui;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const LINE_COLOR: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Rasterizer for the demo: one lit shape, a light marker, an optional
/// light-direction line, and the egui overlay.
pub struct ShapeRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
    phong_pipeline: wgpu::RenderPipeline,
    gouraud_pipeline: wgpu::RenderPipeline,
    marker_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    shape_buffers: [wgpu::Buffer; 3],
    shape_counts: [u32; 3],
    line_buffer: wgpu::Buffer,
    shape_uniform_buffer: wgpu::Buffer,
    light_uniform_buffer: wgpu::Buffer,
    material_uniform_buffer: wgpu::Buffer,
    marker_uniform_buffer: wgpu::Buffer,
    line_uniform_buffer: wgpu::Buffer,
    lit_bind_group: wgpu::BindGroup,
    marker_bind_group: wgpu::BindGroup,
    line_bind_group: wgpu::BindGroup,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
}

impl ShapeRenderer {
    pub async fn new(window: Arc<Window>, scene: &SceneState) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let config = Self::create_surface_config(&surface, &adapter, size);
        surface.configure(&device, &config);

        let depth_view = Self::create_depth_texture(&device, size);

        // All three primitive meshes are uploaded once; selection only
        // changes which buffer gets bound.
        let shape_buffers = ShapeKind::ALL.map(|kind| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(kind.label()),
                contents: bytemuck::cast_slice(&kind.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        let shape_counts = ShapeKind::ALL.map(|kind| kind.vertices().len() as u32);

        let line_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Direction Line"),
            contents: bytemuck::cast_slice(&line_vertices(scene)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let shape_uniform_buffer = Self::create_uniform_buffer(
            &device,
            "Shape Uniforms",
            bytemuck::bytes_of(&ShapeUniforms::new(
                scene.shape_transform,
                glam::Mat4::IDENTITY,
                glam::Mat4::IDENTITY,
                Vec3::ZERO,
            )),
        );
        let light_uniform_buffer = Self::create_uniform_buffer(
            &device,
            "Light Uniform",
            bytemuck::bytes_of(&scene.light.to_uniform()),
        );
        let material_uniform_buffer = Self::create_uniform_buffer(
            &device,
            "Material Uniform",
            bytemuck::bytes_of(&scene.material.material().to_uniform()),
        );
        let marker_uniform_buffer = Self::create_uniform_buffer(
            &device,
            "Marker Uniform",
            bytemuck::bytes_of(&SolidUniform::new(glam::Mat4::IDENTITY, scene.light.color)),
        );
        let line_uniform_buffer = Self::create_uniform_buffer(
            &device,
            "Line Uniform",
            bytemuck::bytes_of(&SolidUniform::new(glam::Mat4::IDENTITY, LINE_COLOR)),
        );

        let lit_layout = Self::create_lit_bind_group_layout(&device);
        let lit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &lit_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: shape_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: material_uniform_buffer.as_entire_binding(),
                },
            ],
            label: Some("lit_bind_group"),
        });

        let solid_layout = Self::create_solid_bind_group_layout(&device);
        let marker_bind_group = Self::create_solid_bind_group(
            &device,
            &solid_layout,
            &marker_uniform_buffer,
            "marker_bind_group",
        );
        let line_bind_group = Self::create_solid_bind_group(
            &device,
            &solid_layout,
            &line_uniform_buffer,
            "line_bind_group",
        );

        let lit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Lit Pipeline Layout"),
            bind_group_layouts: &[&lit_layout],
            push_constant_ranges: &[],
        });
        let solid_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Solid Pipeline Layout"),
            bind_group_layouts: &[&solid_layout],
            push_constant_ranges: &[],
        });

        let phong_pipeline = Self::create_pipeline(
            &device,
            &lit_pipeline_layout,
            include_str!("phong.wgsl"),
            "Phong Pipeline",
            config.format,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let gouraud_pipeline = Self::create_pipeline(
            &device,
            &lit_pipeline_layout,
            include_str!("gouraud.wgsl"),
            "Gouraud Pipeline",
            config.format,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let marker_pipeline = Self::create_pipeline(
            &device,
            &solid_pipeline_layout,
            include_str!("solid.wgsl"),
            "Marker Pipeline",
            config.format,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = Self::create_pipeline(
            &device,
            &solid_pipeline_layout,
            include_str!("solid.wgsl"),
            "Line Pipeline",
            config.format,
            wgpu::PrimitiveTopology::LineList,
        );

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            egui_wgpu::RendererOptions::default(),
        );

        log::info!("renderer initialized ({}x{})", size.width, size.height);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            size,
            depth_view,
            phong_pipeline,
            gouraud_pipeline,
            marker_pipeline,
            line_pipeline,
            shape_buffers,
            shape_counts,
            line_buffer,
            shape_uniform_buffer,
            light_uniform_buffer,
            material_uniform_buffer,
            marker_uniform_buffer,
            line_uniform_buffer,
            lit_bind_group,
            marker_bind_group,
            line_bind_group,
            egui_renderer,
            egui_state,
            egui_ctx,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("failed to acquire a GPU device")
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_uniform_buffer(
        device: &wgpu::Device,
        label: &str,
        contents: &[u8],
    ) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    fn create_lit_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0), uniform_entry(1), uniform_entry(2)],
            label: Some("lit_bind_group_layout"),
        })
    }

    fn create_solid_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("solid_bind_group_layout"),
        })
    }

    fn create_solid_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader_src: &str,
        label: &str,
        surface_format: wgpu::TextureFormat,
        topology: wgpu::PrimitiveTopology,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.size = size;
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_texture(&self.device, size);
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    fn aspect(&self) -> f32 {
        self.size.width as f32 / self.size.height.max(1) as f32
    }

    pub fn render(
        &mut self,
        camera: &mut Camera,
        scene: &mut SceneState,
        window: &Window,
        show_ui: bool,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let aspect = self.aspect();
        let view_proj = camera.projection_matrix(aspect) * camera.view_matrix();

        self.queue.write_buffer(
            &self.shape_uniform_buffer,
            0,
            bytemuck::bytes_of(&camera.to_uniforms(scene.shape_transform, aspect)),
        );
        self.queue.write_buffer(
            &self.light_uniform_buffer,
            0,
            bytemuck::bytes_of(&scene.light.to_uniform()),
        );
        self.queue.write_buffer(
            &self.material_uniform_buffer,
            0,
            bytemuck::bytes_of(&scene.material.material().to_uniform()),
        );
        self.queue.write_buffer(
            &self.marker_uniform_buffer,
            0,
            bytemuck::bytes_of(&SolidUniform::new(
                view_proj * scene.light_model_matrix(),
                scene.light.color,
            )),
        );
        self.queue.write_buffer(
            &self.line_uniform_buffer,
            0,
            bytemuck::bytes_of(&SolidUniform::new(view_proj, LINE_COLOR)),
        );
        self.queue
            .write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&line_vertices(scene)));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        // Scene pass
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Light marker
            let marker = scene.light_shape.index();
            render_pass.set_pipeline(&self.marker_pipeline);
            render_pass.set_bind_group(0, &self.marker_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.shape_buffers[marker].slice(..));
            render_pass.draw(0..self.shape_counts[marker], 0..1);

            // Selected shape with the selected shading model
            let shape = scene.shape.index();
            let pipeline = match scene.shading {
                ShadingModel::Phong => &self.phong_pipeline,
                ShadingModel::Gouraud => &self.gouraud_pipeline,
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &self.lit_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.shape_buffers[shape].slice(..));
            render_pass.draw(0..self.shape_counts[shape], 0..1);

            // Light direction line
            if scene.show_light_direction {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_bind_group(0, &self.line_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
                render_pass.draw(0..2, 0..1);
            }
        }

        // egui pass - UI overlay
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show_ui {
                ui::options_panel(ctx, camera, scene);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.size.width, self.size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // SAFETY: The render pass lifetime is actually tied to the encoder,
            // but egui-wgpu requires 'static. This is safe because we drop the
            // render pass before using the encoder again.
            let render_pass_static = unsafe {
                std::mem::transmute::<&mut wgpu::RenderPass<'_>, &mut wgpu::RenderPass<'static>>(
                    &mut render_pass,
                )
            };

            self.egui_renderer
                .render(render_pass_static, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Offer an event to egui first; returns true if it was consumed.
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }
}

fn line_vertices(scene: &SceneState) -> [Vertex; 2] {
    let [from, to] = scene.light_line();
    let normal = [0.0, 1.0, 0.0];
    [
        Vertex {
            position: from.to_array(),
            normal,
        },
        Vertex {
            position: to.to_array(),
            normal,
        },
    ]
}
